// Prompt construction for AI-drafted RFPs. All model calls go through
// `llm_client`; this module only builds text.

use anyhow::Result;

use crate::values::ValuesRecord;

const RFP_PROMPT_TEMPLATE: &str = "\
Based on the following sourcing initiative data, generate a professional and comprehensive \
Request for Proposal (RFP) document.
The document should be well-structured with clear sections, headings, and lists.

Sourcing Initiative Data:
{initiative_data}
";

pub fn build_rfp_prompt(data: &ValuesRecord) -> Result<String> {
    let data_json = serde_json::to_string_pretty(data)?;
    Ok(RFP_PROMPT_TEMPLATE.replace("{initiative_data}", &data_json))
}
