// CommandOracle: classify chunks by piping them through an external program.
//
// Any CLI that reads a prompt on stdin and prints a reply works, e.g.
// `ollama run <model>`. The prompt and the chunk go in on stdin; stdout is
// the raw response handed to the fail-closed parser.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use anyhow::{Context, Result};

use super::traits::ClassificationOracle;

/// Instruction prepended to every chunk unless a prompt file is given.
pub const DEFAULT_PROMPT: &str = "\
You are a strict JSON classifier. Respond only with valid JSON of the form \
{\"answer\":\"yes|no\",\"evidence\":[\"...\"],\"confidence\":0-1}. \
If uncertain, answer \"no\".

Task: decide whether the text below contains a DETAILED technical \
specification of a motor vehicle or machine: several measurable parameters \
such as engine power (kW, HP), displacement (cm3), fuel type, transmission, \
consumption, weight, dimensions, payload, capacity, emission standard.

Answer \"yes\" only when at least two different technical parameters are \
present. Identification data alone (brand, model, VIN, registration number) \
or purely administrative, financial or legal content (invoice, price, \
contract, order, correspondence) is \"no\".

Text:
";

pub struct CommandOracle {
    program: String,
    args: Vec<String>,
    prompt: String,
}

impl CommandOracle {
    pub fn new(program: impl Into<String>, args: Vec<String>, prompt: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args,
            prompt: prompt.into(),
        }
    }

    /// Build from a whitespace-separated command line such as
    /// `ollama run llama3`.
    pub fn from_command_line(command_line: &str, prompt: impl Into<String>) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let Some(program) = parts.next() else {
            anyhow::bail!("Oracle command is empty");
        };
        Ok(Self::new(program, parts.collect(), prompt))
    }
}

impl ClassificationOracle for CommandOracle {
    fn ask(&self, chunk: &str) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to start oracle command `{}`", self.program))?;

        // Feed stdin from its own thread while stdout drains, so neither
        // pipe can fill up and stall the child.
        let mut stdin = child
            .stdin
            .take()
            .context("Oracle command has no stdin")?;
        let input = format!("{}{}", self.prompt, chunk);
        let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child
            .wait_with_output()
            .context("Failed to wait for oracle command")?;
        let written = writer
            .join()
            .map_err(|_| anyhow::anyhow!("Oracle stdin writer panicked"))?;

        if !output.status.success() {
            anyhow::bail!(
                "Oracle command exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        written.context("Failed to write prompt to oracle command")?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn name(&self) -> &str {
        &self.program
    }
}
