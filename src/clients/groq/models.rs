#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GroqModel {
    #[default]
    Llama3_70b,  // "llama3-70b-8192"
    Llama3_8b,   // "llama3-8b-8192"
    Override(String),
}

impl GroqModel {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Llama3_70b => "llama3-70b-8192",
            Self::Llama3_8b => "llama3-8b-8192",
            Self::Override(s) => s.as_str(),
        }
    }
}

impl From<&str> for GroqModel {
    fn from(id: &str) -> Self {
        match id {
            "llama3-70b-8192" => Self::Llama3_70b,
            "llama3-8b-8192" => Self::Llama3_8b,
            other => Self::Override(other.to_string()),
        }
    }
}
