use samaki_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for the web frontend
    let mut types = Vec::new();

    types.push(clean_type(RegisterRequest::export_to_string()?));
    types.push(clean_type(LoginRequest::export_to_string()?));
    types.push(clean_type(AuthResponse::export_to_string()?));
    types.push(clean_type(CatchReport::export_to_string()?));
    types.push(clean_type(PriceAnalysis::export_to_string()?));
    types.push(clean_type(ImageAnalysis::export_to_string()?));
    types.push(clean_type(AnalysisResponse::export_to_string()?));
    types.push(clean_type(MarketInsight::export_to_string()?));
    types.push(clean_type(StructuredInsight::export_to_string()?));
    types.push(clean_type(CreditScoreResponse::export_to_string()?));
    types.push(clean_type(ScoreComponents::export_to_string()?));
    types.push(clean_type(LoanApplicationRequest::export_to_string()?));
    types.push(clean_type(LoanApplicationResponse::export_to_string()?));
    types.push(clean_type(InsuranceQuoteResponse::export_to_string()?));
    types.push(clean_type(MatchRequest::export_to_string()?));
    types.push(clean_type(MatchResponse::export_to_string()?));
    types.push(clean_type(BuyerMatch::export_to_string()?));
    types.push(clean_type(UserStatsResponse::export_to_string()?));
    types.push(clean_type(UserCatchesResponse::export_to_string()?));
    types.push(clean_type(UserTransactionsResponse::export_to_string()?));
    types.push(clean_type(UserMarketInsightsResponse::export_to_string()?));
    types.push(clean_type(BuyersResponse::export_to_string()?));
    types.push(clean_type(SellersResponse::export_to_string()?));
    types.push(clean_type(HealthResponse::export_to_string()?));
    types.push(clean_type(ChatRole::export_to_string()?));
    types.push(clean_type(MessagePart::export_to_string()?));
    types.push(clean_type(ChatMessage::export_to_string()?));
    types.push(clean_type(ChatRequest::export_to_string()?));

    let output_dir = Path::new("web/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');
    let lines: Vec<&str> = type_def.lines().collect();
    let filtered: Vec<&str> = lines
        .iter()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
        })
        .cloned()
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
