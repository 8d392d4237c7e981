use thiserror::Error;

#[derive(Error, Debug)]
pub enum ElementError {
    #[error("element '{element}' is missing attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },
    #[error("element '{element}' has no child '{child}'")]
    MissingChild { element: String, child: String },
    #[error("element '{element}': '{value}' is not a valid {expected}")]
    InvalidValue {
        element: String,
        value: String,
        expected: String,
    },
}
