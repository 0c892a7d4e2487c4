//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `markvault_core` linkage.
//! - List a vault from the command line for quick manual checks.

use markvault_core::{display_name, FsVaultGateway, VaultSession};

fn main() {
    println!("markvault_core ping={}", markvault_core::ping());
    println!("markvault_core version={}", markvault_core::core_version());

    // Optional vault path argument: attach and print the listing the same
    // way a UI sidebar would see it.
    if let Some(vault) = std::env::args().nth(1) {
        let mut session = VaultSession::new(FsVaultGateway::new());
        let snapshot = session.attach_vault(vault);
        println!("notes={}", snapshot.notes.len());
        for note in &snapshot.notes {
            println!("  {} ({})", display_name(note), note.display());
        }
    }
}
