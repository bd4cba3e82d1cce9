// Copyright (C) Microsoft Corporation. All rights reserved.

#![allow(clippy::unwrap_used)]

mod signature;

use super::*;
