use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

use ghtail::config::Preferences;
use ghtail::i18n::Lang;

pub fn save_language(lang: Lang) -> Result<()> {
    let mut prefs = Preferences::load();
    prefs.language = Some(lang);
    prefs.save().context("Failed to save language preference")?;
    println!("✓ Language set to {}", lang);
    Ok(())
}

pub fn generate_completions(shell: Shell) {
    let mut cmd = crate::Cli::command();
    generate(shell, &mut cmd, "ghtail", &mut io::stdout());

    eprintln!();
    eprintln!("Save the output to the appropriate location for your shell:");
    match shell {
        Shell::Bash => {
            eprintln!("  ghtail completions bash > ~/.local/share/bash-completion/completions/ghtail");
        }
        Shell::Zsh => {
            eprintln!("  ghtail completions zsh > ~/.zsh/completions/_ghtail");
            eprintln!("  # (Add 'fpath=(~/.zsh/completions $fpath)' before 'compinit' in .zshrc)");
        }
        Shell::Fish => {
            eprintln!("  ghtail completions fish > ~/.config/fish/completions/ghtail.fish");
        }
        _ => {}
    }
}
