//! Prompt sent to the estimation service

use super::PredictionRequest;
use std::fmt::Write;

/// Build the natural-language prompt embedding every request field
pub fn build_prompt(request: &PredictionRequest) -> String {
    let mut prompt = String::from(
        "You are an expert salary estimator.\n\
         Estimate a fair salary in INR for the following:\n",
    );

    let years = request.years_experience_text();
    let lines = [
        ("Job Title", request.job_title()),
        ("Industry", request.industry()),
        ("Employment Type", request.employment_type()),
        ("Company Size", request.company_size()),
        ("Years of Experience", years.as_str()),
        ("Remote", request.remote()),
        ("Location", request.location()),
        ("Education Level", request.education_level()),
    ];
    for (label, value) in lines {
        // Writing to a String cannot fail
        let _ = writeln!(prompt, "- {}: {}", label, value);
    }

    prompt.push_str(
        "\nONLY return the estimated annual salary range in INR,\n\
         like \"₹6,00,000 - ₹8,50,000 per annum\" and nothing else.\n\
         Do not add explanations, factors, or any extra text.\n",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::request::sample_request;

    #[test]
    fn prompt_contains_every_field() {
        let prompt = build_prompt(&sample_request());

        for needle in [
            "- Job Title: Software Engineer",
            "- Employment Type: Full-time",
            "- Industry: IT",
            "- Company Size: Large",
            "- Years of Experience: 3.0",
            "- Remote: Yes",
            "- Location: Bangalore",
            "- Education Level: Bachelor's",
        ] {
            assert!(prompt.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn prompt_lists_industry_second() {
        let prompt = build_prompt(&sample_request());
        let labels: Vec<&str> = prompt
            .lines()
            .filter_map(|l| l.strip_prefix("- "))
            .filter_map(|l| l.split(':').next())
            .collect();
        assert_eq!(
            labels,
            [
                "Job Title",
                "Industry",
                "Employment Type",
                "Company Size",
                "Years of Experience",
                "Remote",
                "Location",
                "Education Level",
            ]
        );
    }

    #[test]
    fn prompt_asks_for_range_only() {
        let prompt = build_prompt(&sample_request());
        assert!(prompt.starts_with("You are an expert salary estimator."));
        assert!(prompt.contains("per annum"));
        assert!(prompt.contains("nothing else"));
    }
}
