// Upload path: fixed-template pitch generation over a whole table.
// No model is called anywhere; "GPT" in the product name is branding only.

pub mod formatter;
pub mod handlers;
pub mod template;
