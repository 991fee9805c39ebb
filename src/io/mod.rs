// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for poster frames and review scenes.

pub mod media;
pub mod serialization;
