//! Interactive REPL mode

use crate::commands::{LoginCommand, LogoutCommand, NavCommand, OpenCommand, WhoamiCommand};
use crate::context::Context;
use shared::format_role;
use std::io::{self, Write};

/// Interactive CLI keeping one portal session open between commands
pub struct InteractiveCli {
    ctx: Context,
}

impl InteractiveCli {
    pub fn new(ctx: Context) -> Self {
        Self { ctx }
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> anyhow::Result<()> {
        println!("Campus ERP Interactive Mode");
        println!("Type /help for commands, /quit to exit");
        println!();

        loop {
            print!("[{}] > ", self.prompt_label());
            io::stdout().flush()?;

            let mut input = String::new();
            if io::stdin().read_line(&mut input)? == 0 {
                break;
            }
            let input = input.trim();
            if input.is_empty() {
                continue;
            }

            if !input.starts_with('/') {
                println!("Commands start with '/'. Type /help for the list.");
                continue;
            }
            match self.handle_command(input).await {
                Ok(true) => break,
                Ok(false) => {}
                Err(e) => println!("Error: {}", e),
            }
        }

        Ok(())
    }

    fn prompt_label(&self) -> String {
        match self.ctx.portal.profile() {
            Some(profile) => format_role(&profile.role),
            None if self.ctx.portal.state().is_authenticated() => "signed in".to_string(),
            None => "anonymous".to_string(),
        }
    }

    async fn handle_command(&mut self, input: &str) -> anyhow::Result<bool> {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");

        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Goodbye!");
                return Ok(true);
            }
            "/help" | "/h" => {
                println!("Commands:");
                println!("  /login        - Sign in");
                println!("  /nav          - Show navigation for your role");
                println!("  /open <path>  - Open a screen, e.g. /open /my-result");
                println!("  /whoami       - Show your profile");
                println!("  /logout       - Sign out");
                println!("  /status       - Show session status");
                println!("  /quit         - Exit");
            }
            "/login" => LoginCommand { email: parts.get(1).map(|s| s.to_string()) }.run(&mut self.ctx).await?,
            "/nav" => NavCommand {}.run(&mut self.ctx).await?,
            "/open" => match parts.get(1) {
                Some(path) => OpenCommand { path: path.to_string() }.run(&mut self.ctx).await?,
                None => anyhow::bail!("Usage: /open <path>"),
            },
            "/whoami" => WhoamiCommand {}.run(&mut self.ctx).await?,
            "/logout" => LogoutCommand { yes: false }.run(&mut self.ctx).await?,
            "/status" => {
                let portal = &self.ctx.portal;
                let stats = portal.audit_stats();
                println!("Status:");
                println!("  Session: {}", portal.state());
                println!("  API:     {}", portal.client().base_url());
                println!("  Role:    {}", portal.role().map(|r| r.display_name()).unwrap_or_else(|| "-".to_string()));
                println!("  Audit:   {} entries, {} denied", stats.total_entries, stats.denial_count);
            }
            _ => {
                println!("Unknown command: {}", cmd);
            }
        }

        Ok(false)
    }
}
