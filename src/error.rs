//! Error types for the macro-rail firmware.
//!
//! Provides unified error handling across configuration, axis motion,
//! rejected operator input and peripheral bring-up.

use core::fmt;

/// Result type alias using the crate's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all macro-rail operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Settings record parsing, validation or storage error
    Config(ConfigError),
    /// Axis pulse train error
    Axis(AxisError),
    /// Operator request refused; reported on screen, never fatal
    Rejected(RejectReason),
    /// Peripheral initialization failure at boot
    Hardware(HardwareError),
}

/// Settings record errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse a TOML settings record
    ParseError(heapless::String<128>),
    /// Failed to serialize a settings record
    SerializeError(heapless::String<128>),
    /// Steps per millimeter must be > 0
    InvalidStepsPerMm(i32),
    /// Maximum travel must be > 0
    InvalidMaxTravel(f32),
    /// Rail step size must be > 0
    InvalidStepSize(f32),
    /// Stack step distance must be > 0
    InvalidStackStep(f32),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Axis motion errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisError {
    /// STEP, DIR or ENABLE pin operation failed
    PinError,
    /// Camera trigger line operation failed
    TriggerError,
}

/// Reasons an operator request is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Motion requested before the rail was homed
    NotHomed,
    /// Stack plan yields no shots
    InvalidStackPlan,
    /// The axis is owned by a running stack sequence
    Busy,
}

/// Peripheral bring-up errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareError {
    /// A peripheral's initial pin state could not be driven
    InitFailed(&'static str),
    /// An encoder input pin could not be read
    PinRead,
    /// The stack sequencer task could not be created
    TaskSpawn,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Axis(e) => write!(f, "Axis error: {}", e),
            Error::Rejected(e) => write!(f, "Request rejected: {}", e),
            Error::Hardware(e) => write!(f, "Hardware error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {}", msg),
            ConfigError::InvalidStepsPerMm(v) => write!(f, "Invalid steps per mm: {}. Must be > 0", v),
            ConfigError::InvalidMaxTravel(v) => write!(f, "Invalid max travel: {}mm. Must be > 0", v),
            ConfigError::InvalidStepSize(v) => write!(f, "Invalid rail step size: {}um. Must be > 0", v),
            ConfigError::InvalidStackStep(v) => write!(f, "Invalid stack step: {}um. Must be > 0", v),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for AxisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisError::PinError => write!(f, "GPIO pin operation failed"),
            AxisError::TriggerError => write!(f, "Camera trigger line operation failed"),
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::NotHomed => write!(f, "rail not homed"),
            RejectReason::InvalidStackPlan => write!(f, "stack plan has no shots"),
            RejectReason::Busy => write!(f, "axis busy with a stack sequence"),
        }
    }
}

impl fmt::Display for HardwareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HardwareError::InitFailed(what) => write!(f, "{} initialization failed", what),
            HardwareError::PinRead => write!(f, "encoder pin read failed"),
            HardwareError::TaskSpawn => write!(f, "could not start stack task"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Config(_) => defmt::write!(f, "Configuration error"),
            Error::Axis(AxisError::PinError) => defmt::write!(f, "Axis pin error"),
            Error::Axis(AxisError::TriggerError) => defmt::write!(f, "Trigger pin error"),
            Error::Rejected(RejectReason::NotHomed) => defmt::write!(f, "Rejected: not homed"),
            Error::Rejected(RejectReason::InvalidStackPlan) => {
                defmt::write!(f, "Rejected: invalid stack plan")
            }
            Error::Rejected(RejectReason::Busy) => defmt::write!(f, "Rejected: busy"),
            Error::Hardware(HardwareError::InitFailed(what)) => {
                defmt::write!(f, "{=str} initialization failed", what)
            }
            Error::Hardware(HardwareError::PinRead) => defmt::write!(f, "Pin read failed"),
            Error::Hardware(HardwareError::TaskSpawn) => defmt::write!(f, "Task spawn failed"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<AxisError> for Error {
    fn from(e: AxisError) -> Self {
        Error::Axis(e)
    }
}

impl From<RejectReason> for Error {
    fn from(e: RejectReason) -> Self {
        Error::Rejected(e)
    }
}

impl From<HardwareError> for Error {
    fn from(e: HardwareError) -> Self {
        Error::Hardware(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for AxisError {}

#[cfg(feature = "std")]
impl std::error::Error for RejectReason {}

#[cfg(feature = "std")]
impl std::error::Error for HardwareError {}
