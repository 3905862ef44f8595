// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell

use crate::request::MindMapRequest;
use anyhow::Result;

/// Print the instruction text without sending it
pub fn run(request: &MindMapRequest) -> Result<()> {
    print!("{}", request.prompt());
    Ok(())
}
