pub mod provenance;
pub mod rules;

pub use provenance::{explain_origin, explain_period, infer_origin, infer_period};
pub use rules::{ORIGIN_RULES, PERIOD_RULES, Rule, RuleTable, Verdict};
