//! Tools bundled with the server.

use linetool_core::{Error, Tool, ToolArguments};

/// Tells `name` they are not good enough.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gaslight;

impl Tool for Gaslight {
    fn parameters(&self) -> &[&str] {
        &["name"]
    }

    fn description(&self) -> Option<&str> {
        Some("Gaslight someone at work.")
    }

    fn invoke(&self, args: &ToolArguments) -> Result<String, Error> {
        let name = args.require("gaslight", "name")?;
        Ok(format!(
            "You are not enough, you are not ready, how did you enter this company, \
             see how others perform better than you, {name}, I said this for your own good"
        ))
    }
}

/// Pushes back on `name`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AntiGaslight;

impl Tool for AntiGaslight {
    fn parameters(&self) -> &[&str] {
        &["name"]
    }

    fn description(&self) -> Option<&str> {
        Some("A response for when someone tries to gaslight you at work.")
    }

    fn invoke(&self, args: &ToolArguments) -> Result<String, Error> {
        let name = args.require("anti_gaslight", "name")?;
        Ok(format!(
            "{name}, I see your attempt to gaslight me, and that's not okay regardless of your intention, \
             I trust my own abilities and perceptions. "
        ))
    }
}
