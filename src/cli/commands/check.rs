//! Tool availability check.

use console::style;

use docwords::extract::tools::{check_tools, install_hint};

/// Check OCR and PDF tool availability.
pub fn cmd_check() -> anyhow::Result<()> {
    println!("\n{}", style("Extraction Tool Status").bold());
    println!("{}", "-".repeat(50));

    let tools = check_tools();
    let mut all_found = true;

    for (tool, available) in &tools {
        let status = if *available {
            style("✓ found").green()
        } else {
            all_found = false;
            style("✗ not found").red()
        };
        println!("  {:<15} {}", tool, status);
        if !*available {
            println!(
                "                  {}",
                style(format!("Install with: apt install {}", install_hint(tool))).dim()
            );
        }
    }

    println!();

    if all_found {
        println!("{} All PDF and OCR tools are available", style("✓").green());
    } else {
        println!(
            "{} Some tools are missing. DOCX, ODT and TXT extraction still work; PDFs need all three.",
            style("!").yellow()
        );
    }

    Ok(())
}
