//! Facet definitions sent with every engine request.

use pkl_core::models::EngineFacet;

fn facet(name: &str, question: &str, prefill: &str, criteria: &str) -> EngineFacet {
    EngineFacet {
        name: name.to_string(),
        question: question.to_string(),
        prefill: prefill.to_string(),
        summary_criteria: Some(criteria.to_string()),
        numeric: None,
    }
}

fn numeric_facet(
    name: &str,
    question: &str,
    prefill: &str,
    range: (u32, u32),
    criteria: &str,
) -> EngineFacet {
    EngineFacet {
        numeric: Some(range),
        ..facet(name, question, prefill, criteria)
    }
}

/// The data-science facet set the engine is asked to answer.
pub fn default_engine_facets() -> Vec<EngineFacet> {
    vec![
        facet(
            "DataScienceIntent",
            "What is the primary data science intent of this session?",
            "The primary data science intent is to",
            "The cluster name should capture the specific data science goal. For example, \
             'Explore customer segmentation patterns' or 'Debug machine learning model performance'.",
        ),
        facet(
            "AnalysisType",
            "What type of analysis is being performed in this session?",
            "The type of analysis is",
            "Categorize the analysis approach: exploratory data analysis, statistical modeling, \
             machine learning, data visualization, or data preprocessing.",
        ),
        facet(
            "TechnicalApproach",
            "What technical approach or methodology is being used?",
            "The technical approach involves",
            "Describe the specific technical methods, libraries, or algorithms being employed.",
        ),
        facet(
            "DataContext",
            "What type of data or domain is being analyzed?",
            "The data context involves",
            "Identify the data domain, type, or business context being analyzed.",
        ),
        facet(
            "SessionOutcome",
            "What was the outcome or result of this data science session?",
            "The session outcome was",
            "Categorize the success, challenges, or results achieved in the session.",
        ),
        // 1 = simple, 5 = very complex
        numeric_facet(
            "ProcedureComplexity",
            "How complex is the data science procedure being executed?",
            "The procedure complexity is",
            (1, 5),
            "Rate the complexity based on number of steps, technical difficulty, and domain \
             expertise required.",
        ),
        // 1 = not reproducible, 5 = fully reproducible
        numeric_facet(
            "ReproducibilityScore",
            "How reproducible is this data science workflow?",
            "The reproducibility score is",
            (1, 5),
            "Assess how easily this workflow could be reproduced by another data scientist.",
        ),
    ]
}
