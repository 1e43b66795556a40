//! Donation impact estimation.

use crate::advisory::{AdvisoryClient, AdvisoryRequest};

const FALLBACK_IMPACT: &str = "Contribution will be used for essential relief supplies.";

/// Describe the realistic impact of a pledged contribution. Static fallback
/// text on any failure.
pub async fn impact(
    client: &dyn AdvisoryClient,
    amount: &str,
    category: &str,
    language: &str,
) -> String {
    let prompt = format!(
        "Calculate the realistic impact of a donation of ₹{amount} ({category}) for \
disaster relief. Be specific (e.g., provides food for X people for Y days). Keep it \
concise. Respond in {language} language."
    );

    match client.generate(AdvisoryRequest::new(prompt)).await {
        Ok(reply) if !reply.text.is_empty() => reply.text,
        Ok(_) => "Impact data unavailable.".to_string(),
        Err(_) => FALLBACK_IMPACT.to_string(),
    }
}
