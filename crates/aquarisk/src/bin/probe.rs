//! Manual smoke test: post one fixed record and print the response.

use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let url = std::env::var("AQUARISK_PROBE_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:5000/predict".to_string());

    let payload = json!({
        "age": 51,
        "gender": "female",
        "water_src": "spring",
        "sanitation": "good",
        "vacc_typhoid": 0,
        "vacc_hepA": 1,
        "diarrhea_count": 3,
        "vomit_count": 2,
        "body_temp": 40.16,
        "dehydration": 1,
        "jaundice": 0,
        "dark_urine": 0,
        "pale_stool": 0,
        "headache": 0,
        "fatigue": 1,
        "muscle_ache": 1,
        "stool_type": "watery"
    });

    let response = reqwest::Client::new()
        .post(&url)
        .json(&payload)
        .send()
        .await?;

    let body: serde_json::Value = response.json().await?;
    println!("{body}");
    Ok(())
}
