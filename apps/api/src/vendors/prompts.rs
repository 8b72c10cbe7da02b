// Prompt construction for vendor discovery and response comparison.
// All model calls go through `llm_client`; this module only builds text.

use std::collections::BTreeMap;

use anyhow::Result;

use crate::values::ValuesRecord;

const FIND_VENDORS_PROMPT_TEMPLATE: &str = "\
You are a pharmaceutical industry sourcing specialist. Based on the following project \
details, please identify and list 7 potential vendors that would be a good fit.

For each vendor, provide a brief (1-2 sentence) justification for why they are a good \
match based on the project requirements.

Project Details:
{initiative_data}

Please format your response as a list.
";

const COMPARE_PROMPT_TEMPLATE: &str = r#"You are an expert RFP evaluation specialist. Your task is to analyze and compare the following vendor responses for initiative {initiative_id}.

**Instructions:**
1.  Carefully review each vendor's response text provided in the JSON below.
2.  For each vendor, provide a concise summary, list their key strengths and weaknesses, and identify any potential risks.
3.  Score each vendor on a scale of 0 to 10 for the following criteria:
    - Technical Capability
    - Quality & Compliance
    - Project Management
    - Supply Reliability
    - Cost Competitiveness
4.  Calculate a percentage for each score (score / 10 * 100).
5.  Provide an overall recommendation, including a summary of why you are recommending the top vendors.
6.  Format your entire output as a single, valid JSON object. Do not include any text or formatting outside of the JSON block.

Vendor Responses:
{vendor_responses}

**JSON Output Structure:**
```json
{
  "vendors": [
    {
      "vendor_name": "Vendor A Name",
      "summary": "A brief summary of Vendor A's proposal.",
      "scores": {
        "Technical Capability": {"score": 8, "percentage": 80},
        "Quality & Compliance": {"score": 9, "percentage": 90},
        "Project Management": {"score": 7, "percentage": 70},
        "Supply Reliability": {"score": 8, "percentage": 80},
        "Cost Competitiveness": {"score": 6, "percentage": 60}
      },
      "strengths": "List of strengths for Vendor A.",
      "weaknesses": "List of weaknesses for Vendor A.",
      "risks": "Identified risks for Vendor A."
    }
  ],
  "recommendation": {
    "summary": "Overall summary of the evaluation and justification for the recommendation.",
    "top_vendors": ["Vendor A Name", "Vendor B Name"]
  }
}
```"#;

pub fn build_find_vendors_prompt(data: &ValuesRecord) -> Result<String> {
    let data_json = serde_json::to_string_pretty(data)?;
    Ok(FIND_VENDORS_PROMPT_TEMPLATE.replace("{initiative_data}", &data_json))
}

pub fn build_compare_prompt(
    initiative_id: u64,
    responses: &BTreeMap<String, String>,
) -> Result<String> {
    let responses_json = serde_json::to_string_pretty(responses)?;
    Ok(COMPARE_PROMPT_TEMPLATE
        .replace("{initiative_id}", &initiative_id.to_string())
        .replace("{vendor_responses}", &responses_json))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_vendors_prompt_embeds_project_details() {
        let mut data = ValuesRecord::new();
        data.insert("product_type", "Sterile injectable");
        let prompt = build_find_vendors_prompt(&data).unwrap();
        assert!(prompt.contains("7 potential vendors"));
        assert!(prompt.contains("Sterile injectable"));
    }

    #[test]
    fn test_compare_prompt_embeds_responses_and_id() {
        let mut responses = BTreeMap::new();
        responses.insert("acme.pdf".to_string(), "We offer fill-finish.".to_string());
        let prompt = build_compare_prompt(42, &responses).unwrap();
        assert!(prompt.contains("initiative 42"));
        assert!(prompt.contains("We offer fill-finish."));
        // The JSON skeleton the model must follow stays intact.
        assert!(prompt.contains("\"top_vendors\""));
        assert!(prompt.contains("Cost Competitiveness"));
        assert!(!prompt.contains("{vendor_responses}"));
    }
}
