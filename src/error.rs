use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComparatorError {
    #[error("Formule \"{plan}\" introuvable pour {insurer}")]
    PlanNotFound { insurer: String, plan: String },

    #[error("Mutuelle \"{0}\" introuvable")]
    InsurerNotFound(String),

    #[error("Prix invalide pour {field}: {value:?}")]
    InvalidAmount { field: String, value: String },

    #[error("Parametre requis: {0}")]
    MissingParameter(String),

    #[error("Failed to read reference data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse reference data: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ComparatorError>;
