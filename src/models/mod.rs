// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation records and review scenes.

pub mod annotation;
pub mod project;
