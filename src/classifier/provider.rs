use clap::ValueEnum;

/// Which oracle scores interest areas
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OracleProvider {
    /// Zero-shot classification endpoint
    Http,
    /// Offline keyword share from the interest dictionary
    #[default]
    Keyword,
}

impl OracleProvider {
    pub fn name(&self) -> &'static str {
        match self {
            OracleProvider::Http => "http",
            OracleProvider::Keyword => "keyword",
        }
    }
}
