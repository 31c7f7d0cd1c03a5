use anyhow::Result;
use colored::Colorize;

use crate::cargo::{step, OnFailure};

pub fn run(open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Building documentation...".cyan().bold());
    println!();

    let mut args = vec!["doc", "--workspace", "--no-deps", "--document-private-items"];
    if open {
        args.push("--open");
    }
    step("Documentation", &args, OnFailure::Abort)?;

    if !open {
        println!(
            "   {}",
            "Open target/doc/smart_amp/index.html in your browser".dimmed()
        );
        println!("   {}", "Or run 'cargo run -p xtask -- doc --open'".dimmed());
        println!();
    }

    Ok(())
}
