// Physical Constants
pub const EARTH_RADIUS: f64 = 6_371_000.0; // meters
pub const EARTH_MASS: f64 = 5.972e24; // kg
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11; // N⋅m²/kg²
pub const EARTH_ROTATION_RATE: f64 = 7.292_115_9e-5; // rad/s

// Launch Site (Cape Canaveral)
pub const LAUNCH_LATITUDE: f64 = 28.5619; // degrees
pub const LAUNCH_LONGITUDE: f64 = -80.5774; // degrees

// Environmental Constants
pub const SEA_LEVEL_PRESSURE: f64 = 101_325.0; // Pa
pub const SEA_LEVEL_TEMPERATURE: f64 = 288.15; // K
pub const TROPOSPHERE_TEMP_GRADIENT: f64 = -6.5 / 1_000.0; // K per meter
pub const TROPOSPHERE_HEIGHT: f64 = 11_000.0; // m
pub const ATMOSPHERE_SCALE_HEIGHT: f64 = 8_500.0; // m
pub const SPECIFIC_GAS_CONSTANT_AIR: f64 = 287.05; // J/(kg⋅K)

// Aerodynamic Constants
pub const ROCKET_DRAG_COEFFICIENT: f64 = 0.3;
pub const ROCKET_CROSS_SECTIONAL_AREA: f64 = 10.52; // m² (3.66 m diameter)
pub const MAX_DYNAMIC_PRESSURE: f64 = 35_000.0; // Pa, stress = 1.0

// Staging
pub const STAGE_SEPARATION_MARGIN: f64 = 5.0; // s between burnout and the next stage

// Propulsion
pub const FUEL_FRACTION: f64 = 0.7;
pub const OXIDIZER_FRACTION: f64 = 0.3;
pub const NOMINAL_CHAMBER_PRESSURE: f64 = 10.0; // MPa
pub const CHAMBER_PRESSURE_BAND: f64 = 2.0; // MPa
pub const MAX_CHAMBER_PRESSURE: f64 = 15.0; // MPa
pub const NOMINAL_TURBINE_SPEED: f64 = 30_000.0; // RPM
pub const TURBINE_SPEED_BAND: f64 = 5_000.0; // RPM
pub const MAX_TURBINE_SPEED: f64 = 40_000.0; // RPM
pub const ENGINE_AMBIENT_TEMPERATURE: f64 = 300.0; // K
pub const ENGINE_HEATING_RANGE: f64 = 2_000.0; // K at burnout

// Pitch Program
pub const PITCH_START_TIME: f64 = 10.0; // s
pub const PITCH_END_TIME: f64 = 60.0; // s
pub const PITCH_FINAL_DEGREES: f64 = 30.0;
pub const HORIZONTAL_SCALE: f64 = 0.1;

// Telemetry Link
pub const NOMINAL_UPLINK_RATE: f64 = 1_000.0; // bps
pub const NOMINAL_DOWNLINK_RATE: f64 = 10_000.0; // bps
pub const LINK_FLOOR_ALTITUDE: f64 = 500_000.0; // m
pub const LINK_FLOOR_FRACTION: f64 = 0.1;
pub const AVIONICS_DEGRADE_ALTITUDE: f64 = 100_000.0; // m
pub const AVIONICS_DEGRADE_CHANCE: f64 = 0.01;
pub const LINK_DEGRADE_ALTITUDE: f64 = 200_000.0; // m
pub const LINK_DEGRADE_CHANCE: f64 = 0.005;

// Simulation Parameters
pub const TIME_STEP: f64 = 0.1; // s of mission time per tick at speed 1
pub const TICK_INTERVAL_MS: u64 = 100; // wall-clock period
pub const MAX_SIMULATION_TIME: f64 = 600.0; // s
pub const TARGET_APOGEE: f64 = 200_000.0; // m

// Payload
pub const PAYLOAD_MASS: f64 = 15_600.0; // kg
pub const PAYLOAD_DEPLOY_TIME: f64 = 580.0; // s
