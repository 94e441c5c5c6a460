//! Theme preference commands.

use anyhow::Result;
use brick_commerce::theme::{Appearance, ThemeStore};

use super::{ThemeArgs, ThemeCommand};
use crate::context::Context;

/// Run the theme command.
pub async fn run(args: ThemeArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.theme();

    let system = match args.command {
        Some(ThemeCommand::Show { system }) => system,
        None => Appearance::Light,
        Some(ThemeCommand::Set { theme }) => {
            store.set_theme(theme);
            ctx.output.success(&format!("Theme set to {}", theme));
            Appearance::Light
        }
        Some(ThemeCommand::Toggle) => {
            let theme = store.toggle_theme();
            ctx.output.success(&format!("Theme switched to {}", theme));
            Appearance::Light
        }
    };

    show(&store, system, ctx);
    Ok(())
}

fn show(store: &ThemeStore, system: Appearance, ctx: &Context) {
    let resolved = store.resolved(system);
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "theme": store.theme(),
            "resolved": resolved,
        }));
        return;
    }
    ctx.output.kv("Preference", store.theme().as_str());
    let rendered = match resolved {
        Appearance::Light => "light",
        Appearance::Dark => "dark",
    };
    ctx.output.kv("Renders as", rendered);
}
