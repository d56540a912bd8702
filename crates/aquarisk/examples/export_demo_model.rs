//! Export the built-in demo model as a JSON artifact.
//!
//! Writes `model.json` to the working directory so the server binary has an
//! artifact to load, then scores the canonical example record against it.
//!
//! Run with:
//! ```bash
//! cargo run --example export_demo_model
//! ```

use aquarisk::{persist, testing};

fn main() -> anyhow::Result<()> {
    let model = testing::demo_model();
    let path = "model.json";

    persist::save_model(&model, path)?;
    println!("wrote {path}");
    println!(
        "  {} features, labels {:?}",
        model.meta().n_features(),
        model.meta().labels
    );

    // Sanity check: reload and score the example record.
    let restored = persist::load_model(path)?;
    let scores = restored.labeled_scores(&testing::demo_row());

    println!("example record scores:");
    for (label, probability) in scores {
        println!("  {label}: {:.2}%", probability * 100.0);
    }

    Ok(())
}
