#![allow(non_snake_case)]

use std::fmt;
use std::sync::Arc;

//Error handling crates
use anyhow::{Result, Context, ensure};
use thiserror::Error;

//Serializing/Deserializing crate
use serde::Deserialize;

//Parallelization
use rayon::prelude::*;

//Progress bar
use indicatif::{ProgressBar, ProgressStyle};

//I/O
use std::fs::{File, OpenOptions};
use std::io::prelude::*;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

//itertools
use itertools::izip;

//Logging
use tracing::{info, warn, error};

//Load internal modules
pub mod consts;
pub mod structs;
pub mod error;
pub mod field;
pub mod frame;
pub mod plane;
pub mod tracer;
pub mod input;
pub mod geometry;
pub mod output;
pub mod physics;


pub use crate::consts::*;
pub use crate::structs::*;
pub use crate::error::FieldError;
pub use crate::field::{FieldGrid, GridParameters};
pub use crate::frame::MountingFrame;
pub use crate::plane::ExitPlane;
pub use crate::tracer::Tracer;
pub use crate::input::{Input, Options, GeometryInput, MagnetParameters, TrajectoryParameters, TrajectoryInput};
pub use crate::geometry::{Bounds, Viewport};
pub use crate::physics::{trace_loop, build_tracer};
