// The one fixed narrative every pitch is rendered from.
// Section headings are matched by the tests and by readers scanning exports;
// keep their wording and order stable.

use crate::models::startup::StartupRecord;
use crate::pitch::formatter::{format_decimal, format_thousands};

pub const SECTION_PROBLEM: &str = "Problem";
pub const SECTION_SOLUTION: &str = "Solution";
pub const SECTION_MARKET: &str = "Market Opportunity";
pub const SECTION_BUSINESS_MODEL: &str = "Business Model";
pub const SECTION_FUNDING_ASK: &str = "Funding Ask";

/// Renders the five-section pitch for a fully typed record.
pub fn render_pitch(r: &StartupRecord) -> String {
    let name = &r.name;
    let industry = &r.industry;
    let country = &r.country;

    format!(
        "**Investor Pitch for {name} ({industry})**

**{SECTION_PROBLEM}**
{industry} is facing major scalability and customer personalization issues in global markets like {country}. Traditional models are failing to address high-volume demand with precision.

**{SECTION_SOLUTION}**
{name}, founded in {founded}, offers a cutting-edge, scalable solution powered by technologies like {tech_stack}. We serve over {customer_base} million users with annual revenues of ${revenue}M.

**{SECTION_MARKET}**
{name} operates in the high-growth {industry} sector, with global demand projected to grow rapidly. With {followers} followers and presence in {country}, we're poised for market dominance.

**{SECTION_BUSINESS_MODEL}**
We operate a B2B/B2C hybrid model with {employees} employees. Our valuation of ${valuation}B and total funding of ${funding}M highlights market confidence. Our next step: expand and monetize globally.

**{SECTION_FUNDING_ASK}**
Currently in the **{funding_stage}** stage, we are seeking strategic investors to join us in our next growth phase. Let's build the future of {industry} together.",
        founded = r.founded,
        tech_stack = r.tech_stack,
        customer_base = format_decimal(r.customer_base),
        revenue = format_decimal(r.revenue),
        followers = format_thousands(r.followers),
        employees = r.employees,
        valuation = format_decimal(r.valuation),
        funding = format_decimal(r.funding),
        funding_stage = r.funding_stage,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::repair_text;

    fn acme() -> StartupRecord {
        StartupRecord {
            name: "Acme".to_string(),
            founded: 2020,
            country: "US".to_string(),
            industry: "Fintech".to_string(),
            funding_stage: "Series A".to_string(),
            funding: 10.0,
            employees: 25,
            revenue: 2.5,
            valuation: 0.1,
            customer_base: 1.2,
            tech_stack: "ML".to_string(),
            followers: 5000,
        }
    }

    #[test]
    fn test_template_text_survives_repair() {
        // Curly quotes or dashes here would sit outside Latin-1 and make
        // every stored pitch unrepairable.
        let pitch = render_pitch(&acme());
        assert!(pitch.is_ascii());
        assert!(pitch.contains("we're poised"));
        assert!(pitch.contains("Let's build the future of Fintech together."));
        assert_eq!(repair_text(&pitch), pitch);
    }
}
