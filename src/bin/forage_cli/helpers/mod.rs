// ABOUTME: Helper modules for forage-cli
// ABOUTME: Output formatting shared by the command modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Forage Contributors

pub mod output;
