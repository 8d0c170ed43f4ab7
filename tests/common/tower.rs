//! Seeded random towers
//!
//! Project > sites > buildings > storeys under aggregation, elements
//! contained in storeys, assemblies aggregating parts, spaces aggregated
//! into storeys with furniture contained in them. Every element references
//! a shared material and its own placement chain.

use super::ModelBuilder;
use bimslice::{AttributeValue, Entity, EntityId, Model};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ELEMENT_TYPES: &[&str] = &["IfcWall", "IfcSlab", "IfcDoor", "IfcWindow", "IfcColumn", "IfcBeam"];
const NAME_WORDS: &[&str] = &["fire", "exterior", "interior", "load", "acoustic", "glazed"];

/// Size limits for a generated tower
#[derive(Debug, Clone, Copy)]
pub struct TowerShape {
    pub sites: usize,
    pub buildings: usize,
    pub storeys: usize,
    pub elements: usize,
}

impl Default for TowerShape {
    fn default() -> Self {
        Self {
            sites: 2,
            buildings: 2,
            storeys: 3,
            elements: 5,
        }
    }
}

struct Generator {
    builder: ModelBuilder,
    rng: StdRng,
    next: usize,
    material: EntityId,
}

impl Generator {
    fn guid(&mut self, prefix: &str) -> String {
        self.next += 1;
        format!("{}{}", prefix, self.next)
    }

    fn element_name(&mut self, base: &str) -> String {
        let word = NAME_WORDS[self.rng.gen_range(0..NAME_WORDS.len())];
        format!("{} {} {}", word, base, self.next)
    }

    fn placement(&mut self, relative_to: Option<EntityId>) -> EntityId {
        let origin = self.builder.raw(Entity::new("IfcCartesianPoint").with_attribute(
            "Coordinates",
            AttributeValue::List(vec![
                AttributeValue::Float(self.rng.gen_range(0.0..100.0)),
                AttributeValue::Float(self.rng.gen_range(0.0..100.0)),
                AttributeValue::Float(0.0),
            ]),
        ));
        let mut placement =
            Entity::new("IfcLocalPlacement").with_attribute("Location", AttributeValue::reference(origin));
        if let Some(parent) = relative_to {
            placement = placement.with_attribute("PlacementRelTo", AttributeValue::reference(parent));
        }
        self.builder.raw(placement)
    }
}

/// Generate a tower from `seed`
///
/// Shapes are upper bounds; each level gets between one and the bound.
pub fn random_tower(seed: u64, shape: TowerShape) -> Model {
    let mut builder = ModelBuilder::new().with_owner_history();
    let material = builder.raw(Entity::new("IfcMaterial").with_attribute(
        "Name",
        AttributeValue::String("Concrete".to_string()),
    ));
    let mut generator = Generator {
        builder,
        rng: StdRng::seed_from_u64(seed),
        next: 0,
        material,
    };

    let project = generator.builder.named("IfcProject", "PROJECT", "Tower");
    let site_count = generator.rng.gen_range(1..=shape.sites);
    let mut sites = Vec::new();
    for _ in 0..site_count {
        let guid = generator.guid("SITE");
        sites.push(generator.builder.entity("IfcSite", &guid));
    }
    generator.builder.aggregate(project, &sites);

    let mut storey_number = 0;
    for site in sites {
        let building_count = generator.rng.gen_range(1..=shape.buildings);
        let mut buildings = Vec::new();
        for _ in 0..building_count {
            let guid = generator.guid("BLD");
            buildings.push(generator.builder.entity("IfcBuilding", &guid));
        }
        generator.builder.aggregate(site, &buildings);

        for building in buildings {
            let storey_count = generator.rng.gen_range(1..=shape.storeys);
            let mut storeys = Vec::new();
            for _ in 0..storey_count {
                storey_number += 1;
                let guid = generator.guid("ST");
                let name = format!("Level {}", storey_number);
                storeys.push(generator.builder.named("IfcBuildingStorey", &guid, &name));
            }
            generator.builder.aggregate(building, &storeys);

            for storey in storeys {
                populate_storey(&mut generator, storey, shape.elements);
            }
        }
    }

    generator.builder.build()
}

fn populate_storey(generator: &mut Generator, storey: EntityId, max_elements: usize) {
    let storey_placement = generator.placement(None);

    let count = generator.rng.gen_range(1..=max_elements);
    let mut contained = Vec::new();
    for _ in 0..count {
        let entity_type = ELEMENT_TYPES[generator.rng.gen_range(0..ELEMENT_TYPES.len())];
        contained.push(placed_element(generator, entity_type, storey_placement));
    }

    // An assembly with parts, contained like any other element
    if generator.rng.gen_bool(0.5) {
        let assembly = placed_element(generator, "IfcElementAssembly", storey_placement);
        let parts: Vec<EntityId> = (0..generator.rng.gen_range(1..=3))
            .map(|_| placed_element(generator, "IfcMember", storey_placement))
            .collect();
        generator.builder.aggregate(assembly, &parts);
        contained.push(assembly);
    }
    generator.builder.contain(storey, &contained);

    // A space decomposing the storey, with furniture inside it
    if generator.rng.gen_bool(0.5) {
        let guid = generator.guid("SP");
        let name = generator.element_name("room");
        let space = generator.builder.named("IfcSpace", &guid, &name);
        generator.builder.aggregate(storey, &[space]);
        let furniture: Vec<EntityId> = (0..generator.rng.gen_range(1..=2))
            .map(|_| placed_element(generator, "IfcFurniture", storey_placement))
            .collect();
        generator.builder.contain(space, &furniture);
    }
}

fn placed_element(generator: &mut Generator, entity_type: &str, storey_placement: EntityId) -> EntityId {
    let guid = generator.guid("E");
    let name = generator.element_name(entity_type);
    let placement = generator.placement(Some(storey_placement));
    let history = generator
        .builder
        .model()
        .owner_history()
        .map(|h| h.id)
        .expect("tower has an owner history");
    generator.builder.raw(
        Entity::new(entity_type)
            .with_guid(guid.as_str())
            .with_name(name)
            .with_attribute("OwnerHistory", AttributeValue::reference(history))
            .with_attribute("ObjectPlacement", AttributeValue::reference(placement))
            .with_attribute("Material", AttributeValue::reference(generator.material)),
    )
}
