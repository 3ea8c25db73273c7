// Dweve GEMM Tuner - Benchmark aggregation for GEMM kernel tuning
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Interactive overwrite confirmation.

use gemm_tuner_json::ConfirmOverwrite;
use std::io::{self, BufRead, Stderr, StdinLock, Write};
use std::path::Path;

/// Asks on `output` and reads a `Y`/`N` answer from `input`.
///
/// Unrecognized answers repeat the question. End of input or a failed read
/// counts as no.
#[derive(Debug)]
pub struct OverwritePrompt<R, W> {
    input: R,
    output: W,
}

impl OverwritePrompt<StdinLock<'static>, Stderr> {
    /// Prompt on the terminal. The question goes to stderr so stdout only
    /// carries results.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> OverwritePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> ConfirmOverwrite for OverwritePrompt<R, W> {
    fn confirm_overwrite(&mut self, path: &Path) -> bool {
        loop {
            let asked = write!(
                self.output,
                "File {} already exists. Overwrite? [Y/N]: ",
                path.display()
            )
            .and_then(|()| self.output.flush());
            if asked.is_err() {
                return false;
            }

            let mut answer = String::new();
            match self.input.read_line(&mut answer) {
                Ok(0) | Err(_) => return false,
                Ok(_) => match answer.trim().to_ascii_lowercase().as_str() {
                    "y" | "yes" => return true,
                    "n" | "no" => return false,
                    _ => continue,
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(input: &str) -> (bool, String) {
        let mut output = Vec::new();
        let answer = OverwritePrompt::new(Cursor::new(input.as_bytes()), &mut output)
            .confirm_overwrite(Path::new("out/gemm_type_selection.json"));
        (answer, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_yes_and_no() {
        assert!(ask("Y\n").0);
        assert!(ask("yes\n").0);
        assert!(!ask("n\n").0);
        assert!(!ask("No\n").0);
    }

    #[test]
    fn test_repeats_until_answered() {
        let (answer, output) = ask("maybe\n\ny\n");
        assert!(answer);
        assert_eq!(output.matches("[Y/N]").count(), 3);
        assert!(output.contains("gemm_type_selection.json"));
    }

    #[test]
    fn test_end_of_input_is_no() {
        assert!(!ask("").0);
        assert!(!ask("what\n").0);
    }
}
