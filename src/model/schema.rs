//! Subtype resolution for the IFC entity types the extractor cares about
//!
//! Covers the branch of the inheritance tree under `IfcRoot` that the
//! project and every concrete `IfcProduct` of IFC4 live in, plus the product
//! types only IFC2X3 defines. Where the two schemas disagree on a parent the
//! IFC4 one is used; both sit under `IfcProduct`. Unknown types have no
//! supertype and only match themselves.

pub const PROJECT: &str = "IfcProject";
pub const PRODUCT: &str = "IfcProduct";
pub const BUILDING_STOREY: &str = "IfcBuildingStorey";
pub const OWNER_HISTORY: &str = "IfcOwnerHistory";

/// (type, direct supertype)
const SUPERTYPES: &[(&str, &str)] = &[
    ("IfcObjectDefinition", "IfcRoot"),
    ("IfcContext", "IfcObjectDefinition"),
    ("IfcProject", "IfcContext"),
    ("IfcProjectLibrary", "IfcContext"),
    ("IfcObject", "IfcObjectDefinition"),
    ("IfcProduct", "IfcObject"),
    ("IfcAnnotation", "IfcProduct"),
    ("IfcGrid", "IfcProduct"),
    ("IfcProxy", "IfcProduct"),
    ("IfcPort", "IfcProduct"),
    ("IfcDistributionPort", "IfcPort"),
    // spatial
    ("IfcSpatialElement", "IfcProduct"),
    ("IfcSpatialStructureElement", "IfcSpatialElement"),
    ("IfcSite", "IfcSpatialStructureElement"),
    ("IfcBuilding", "IfcSpatialStructureElement"),
    ("IfcBuildingStorey", "IfcSpatialStructureElement"),
    ("IfcSpace", "IfcSpatialStructureElement"),
    ("IfcSpatialZone", "IfcSpatialElement"),
    ("IfcExternalSpatialStructureElement", "IfcSpatialElement"),
    ("IfcExternalSpatialElement", "IfcExternalSpatialStructureElement"),
    // structural analysis
    ("IfcStructuralActivity", "IfcProduct"),
    ("IfcStructuralAction", "IfcStructuralActivity"),
    ("IfcStructuralCurveAction", "IfcStructuralAction"),
    ("IfcStructuralLinearAction", "IfcStructuralCurveAction"),
    ("IfcStructuralLinearActionVarying", "IfcStructuralLinearAction"),
    ("IfcStructuralPointAction", "IfcStructuralAction"),
    ("IfcStructuralSurfaceAction", "IfcStructuralAction"),
    ("IfcStructuralPlanarAction", "IfcStructuralSurfaceAction"),
    ("IfcStructuralPlanarActionVarying", "IfcStructuralPlanarAction"),
    ("IfcStructuralReaction", "IfcStructuralActivity"),
    ("IfcStructuralCurveReaction", "IfcStructuralReaction"),
    ("IfcStructuralPointReaction", "IfcStructuralReaction"),
    ("IfcStructuralSurfaceReaction", "IfcStructuralReaction"),
    ("IfcStructuralItem", "IfcProduct"),
    ("IfcStructuralConnection", "IfcStructuralItem"),
    ("IfcStructuralCurveConnection", "IfcStructuralConnection"),
    ("IfcStructuralPointConnection", "IfcStructuralConnection"),
    ("IfcStructuralSurfaceConnection", "IfcStructuralConnection"),
    ("IfcStructuralMember", "IfcStructuralItem"),
    ("IfcStructuralCurveMember", "IfcStructuralMember"),
    ("IfcStructuralCurveMemberVarying", "IfcStructuralCurveMember"),
    ("IfcStructuralSurfaceMember", "IfcStructuralMember"),
    ("IfcStructuralSurfaceMemberVarying", "IfcStructuralSurfaceMember"),
    // elements
    ("IfcElement", "IfcProduct"),
    ("IfcBuildingElement", "IfcElement"),
    ("IfcBeam", "IfcBuildingElement"),
    ("IfcBeamStandardCase", "IfcBeam"),
    ("IfcBuildingElementProxy", "IfcBuildingElement"),
    ("IfcChimney", "IfcBuildingElement"),
    ("IfcColumn", "IfcBuildingElement"),
    ("IfcColumnStandardCase", "IfcColumn"),
    ("IfcCovering", "IfcBuildingElement"),
    ("IfcCurtainWall", "IfcBuildingElement"),
    ("IfcDoor", "IfcBuildingElement"),
    ("IfcDoorStandardCase", "IfcDoor"),
    ("IfcFooting", "IfcBuildingElement"),
    ("IfcMember", "IfcBuildingElement"),
    ("IfcMemberStandardCase", "IfcMember"),
    ("IfcPile", "IfcBuildingElement"),
    ("IfcPlate", "IfcBuildingElement"),
    ("IfcPlateStandardCase", "IfcPlate"),
    ("IfcRailing", "IfcBuildingElement"),
    ("IfcRamp", "IfcBuildingElement"),
    ("IfcRampFlight", "IfcBuildingElement"),
    ("IfcRoof", "IfcBuildingElement"),
    ("IfcShadingDevice", "IfcBuildingElement"),
    ("IfcSlab", "IfcBuildingElement"),
    ("IfcSlabElementedCase", "IfcSlab"),
    ("IfcSlabStandardCase", "IfcSlab"),
    ("IfcStair", "IfcBuildingElement"),
    ("IfcStairFlight", "IfcBuildingElement"),
    ("IfcWall", "IfcBuildingElement"),
    ("IfcWallElementedCase", "IfcWall"),
    ("IfcWallStandardCase", "IfcWall"),
    ("IfcWindow", "IfcBuildingElement"),
    ("IfcWindowStandardCase", "IfcWindow"),
    ("IfcBuildingElementComponent", "IfcBuildingElement"),
    ("IfcCivilElement", "IfcElement"),
    ("IfcElementAssembly", "IfcElement"),
    ("IfcEquipmentElement", "IfcElement"),
    ("IfcElectricalElement", "IfcElement"),
    ("IfcGeographicElement", "IfcElement"),
    ("IfcTransportElement", "IfcElement"),
    ("IfcVirtualElement", "IfcElement"),
    ("IfcFurnishingElement", "IfcElement"),
    ("IfcFurniture", "IfcFurnishingElement"),
    ("IfcSystemFurnitureElement", "IfcFurnishingElement"),
    ("IfcElementComponent", "IfcElement"),
    ("IfcBuildingElementPart", "IfcElementComponent"),
    ("IfcDiscreteAccessory", "IfcElementComponent"),
    ("IfcFastener", "IfcElementComponent"),
    ("IfcMechanicalFastener", "IfcElementComponent"),
    ("IfcVibrationIsolator", "IfcElementComponent"),
    ("IfcReinforcingElement", "IfcElementComponent"),
    ("IfcReinforcingBar", "IfcReinforcingElement"),
    ("IfcReinforcingMesh", "IfcReinforcingElement"),
    ("IfcTendon", "IfcReinforcingElement"),
    ("IfcTendonAnchor", "IfcReinforcingElement"),
    ("IfcFeatureElement", "IfcElement"),
    ("IfcFeatureElementAddition", "IfcFeatureElement"),
    ("IfcProjectionElement", "IfcFeatureElementAddition"),
    ("IfcFeatureElementSubtraction", "IfcFeatureElement"),
    ("IfcOpeningElement", "IfcFeatureElementSubtraction"),
    ("IfcOpeningStandardCase", "IfcOpeningElement"),
    ("IfcVoidingFeature", "IfcFeatureElementSubtraction"),
    ("IfcEdgeFeature", "IfcFeatureElementSubtraction"),
    ("IfcChamferEdgeFeature", "IfcEdgeFeature"),
    ("IfcRoundedEdgeFeature", "IfcEdgeFeature"),
    ("IfcSurfaceFeature", "IfcFeatureElement"),
    // distribution
    ("IfcDistributionElement", "IfcElement"),
    ("IfcDistributionControlElement", "IfcDistributionElement"),
    ("IfcActuator", "IfcDistributionControlElement"),
    ("IfcAlarm", "IfcDistributionControlElement"),
    ("IfcController", "IfcDistributionControlElement"),
    ("IfcFlowInstrument", "IfcDistributionControlElement"),
    ("IfcProtectiveDeviceTrippingUnit", "IfcDistributionControlElement"),
    ("IfcSensor", "IfcDistributionControlElement"),
    ("IfcUnitaryControlElement", "IfcDistributionControlElement"),
    ("IfcDistributionFlowElement", "IfcDistributionElement"),
    ("IfcDistributionChamberElement", "IfcDistributionFlowElement"),
    ("IfcEnergyConversionDevice", "IfcDistributionFlowElement"),
    ("IfcAirToAirHeatRecovery", "IfcEnergyConversionDevice"),
    ("IfcBoiler", "IfcEnergyConversionDevice"),
    ("IfcBurner", "IfcEnergyConversionDevice"),
    ("IfcChiller", "IfcEnergyConversionDevice"),
    ("IfcCoil", "IfcEnergyConversionDevice"),
    ("IfcCondenser", "IfcEnergyConversionDevice"),
    ("IfcCooledBeam", "IfcEnergyConversionDevice"),
    ("IfcCoolingTower", "IfcEnergyConversionDevice"),
    ("IfcElectricGenerator", "IfcEnergyConversionDevice"),
    ("IfcElectricMotor", "IfcEnergyConversionDevice"),
    ("IfcEngine", "IfcEnergyConversionDevice"),
    ("IfcEvaporativeCooler", "IfcEnergyConversionDevice"),
    ("IfcEvaporator", "IfcEnergyConversionDevice"),
    ("IfcHeatExchanger", "IfcEnergyConversionDevice"),
    ("IfcHumidifier", "IfcEnergyConversionDevice"),
    ("IfcMotorConnection", "IfcEnergyConversionDevice"),
    ("IfcSolarDevice", "IfcEnergyConversionDevice"),
    ("IfcTransformer", "IfcEnergyConversionDevice"),
    ("IfcTubeBundle", "IfcEnergyConversionDevice"),
    ("IfcUnitaryEquipment", "IfcEnergyConversionDevice"),
    ("IfcFlowController", "IfcDistributionFlowElement"),
    ("IfcAirTerminalBox", "IfcFlowController"),
    ("IfcDamper", "IfcFlowController"),
    ("IfcElectricDistributionBoard", "IfcFlowController"),
    ("IfcElectricDistributionPoint", "IfcFlowController"),
    ("IfcElectricTimeControl", "IfcFlowController"),
    ("IfcFlowMeter", "IfcFlowController"),
    ("IfcProtectiveDevice", "IfcFlowController"),
    ("IfcSwitchingDevice", "IfcFlowController"),
    ("IfcValve", "IfcFlowController"),
    ("IfcFlowFitting", "IfcDistributionFlowElement"),
    ("IfcCableCarrierFitting", "IfcFlowFitting"),
    ("IfcCableFitting", "IfcFlowFitting"),
    ("IfcDuctFitting", "IfcFlowFitting"),
    ("IfcJunctionBox", "IfcFlowFitting"),
    ("IfcPipeFitting", "IfcFlowFitting"),
    ("IfcFlowMovingDevice", "IfcDistributionFlowElement"),
    ("IfcCompressor", "IfcFlowMovingDevice"),
    ("IfcFan", "IfcFlowMovingDevice"),
    ("IfcPump", "IfcFlowMovingDevice"),
    ("IfcFlowSegment", "IfcDistributionFlowElement"),
    ("IfcCableCarrierSegment", "IfcFlowSegment"),
    ("IfcCableSegment", "IfcFlowSegment"),
    ("IfcDuctSegment", "IfcFlowSegment"),
    ("IfcPipeSegment", "IfcFlowSegment"),
    ("IfcFlowStorageDevice", "IfcDistributionFlowElement"),
    ("IfcElectricFlowStorageDevice", "IfcFlowStorageDevice"),
    ("IfcTank", "IfcFlowStorageDevice"),
    ("IfcFlowTerminal", "IfcDistributionFlowElement"),
    ("IfcAirTerminal", "IfcFlowTerminal"),
    ("IfcAudioVisualAppliance", "IfcFlowTerminal"),
    ("IfcCommunicationsAppliance", "IfcFlowTerminal"),
    ("IfcElectricAppliance", "IfcFlowTerminal"),
    ("IfcFireSuppressionTerminal", "IfcFlowTerminal"),
    ("IfcLamp", "IfcFlowTerminal"),
    ("IfcLightFixture", "IfcFlowTerminal"),
    ("IfcMedicalDevice", "IfcFlowTerminal"),
    ("IfcOutlet", "IfcFlowTerminal"),
    ("IfcSanitaryTerminal", "IfcFlowTerminal"),
    ("IfcSpaceHeater", "IfcFlowTerminal"),
    ("IfcStackTerminal", "IfcFlowTerminal"),
    ("IfcWasteTerminal", "IfcFlowTerminal"),
    ("IfcFlowTreatmentDevice", "IfcDistributionFlowElement"),
    ("IfcDuctSilencer", "IfcFlowTreatmentDevice"),
    ("IfcFilter", "IfcFlowTreatmentDevice"),
    ("IfcInterceptor", "IfcFlowTreatmentDevice"),
];

/// Direct supertype of `entity_type`, if known
pub fn supertype(entity_type: &str) -> Option<&'static str> {
    SUPERTYPES
        .iter()
        .find(|(t, _)| t.eq_ignore_ascii_case(entity_type))
        .map(|(_, parent)| *parent)
}

/// Whether `entity_type` is `ancestor` or one of its subtypes (ASCII case-insensitive)
pub fn is_a(entity_type: &str, ancestor: &str) -> bool {
    if entity_type.eq_ignore_ascii_case(ancestor) {
        return true;
    }
    let mut current = supertype(entity_type);
    while let Some(t) = current {
        if t.eq_ignore_ascii_case(ancestor) {
            return true;
        }
        current = supertype(t);
    }
    false
}
