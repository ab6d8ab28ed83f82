pub mod models;
pub mod utils;

// Column names of the maintenance report, as they appear after normalization
// (trimmed, upper-cased).
pub mod columns {
    pub const NUMERO_LAUDO: &str = "NUMERO_LAUDO";
    pub const DATA: &str = "DATA";
    pub const FROTA: &str = "FROTA";
    pub const PARECER: &str = "PARECER";
    pub const ANALISE: &str = "ANALISE";
    pub const CONCLUSAO: &str = "CONCLUSAO";
    pub const DATA_DT: &str = "DATA_DT";

    /// The fixed set every report is guaranteed to expose, in output order.
    pub const EXPECTED: [&str; 6] = [NUMERO_LAUDO, DATA, FROTA, PARECER, ANALISE, CONCLUSAO];
}
