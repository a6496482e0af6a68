use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("prompt catalog is empty")]
    Empty,
    #[error("prompt #{index} in catalog is blank")]
    BlankEntry { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("roll duration {value}ms is outside {min}..={max}ms")]
    OutOfRange { value: u32, min: u32, max: u32 },
    #[error("roll duration {value}ms is not a multiple of {step}ms")]
    OffStep { value: u32, step: u32 },
}
