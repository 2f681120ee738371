use super::*;

/// Suffixes of the list output files, appended to `options.name`.
pub const OUTPUT_SUFFIXES: [&str; 3] = ["trajectories.output", "trajectory_data.output", "summary.output"];

/// File streams for list output
pub struct OutputListStreams {
    trajectory_file_stream: BufWriter<File>,
    trajectory_data_stream: BufWriter<File>,
    summary_file_stream: BufWriter<File>,
}

/// Run-wide tally of traced trajectories.
#[derive(Default)]
pub struct Summary {
    pub num_trajectories: usize,
    pub num_reached: usize,
    pub num_clipped: usize,
}

impl Summary {
    pub fn new() -> Summary {
        Summary::default()
    }

    pub fn update(&mut self, trajectory: &Trajectory, clipped: bool) {
        self.num_trajectories += 1;
        if trajectory.reached {
            self.num_reached += 1;
        }
        if clipped {
            self.num_clipped += 1;
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} trajectories: {} reached the exit plane, {} clipped by the magnet or viewport.",
            self.num_trajectories, self.num_reached, self.num_clipped)
    }
}

/// Names of the output files for this run.
pub fn output_file_names(options: &Options) -> Vec<String> {
    OUTPUT_SUFFIXES.iter().map(|suffix| format!("{}{}", options.name, suffix)).collect()
}

fn open_output_file(options: &Options, suffix: &str) -> Result<BufWriter<File>> {
    let file_name = format!("{}{}", options.name, suffix);
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&file_name)
        .with_context(|| format!("Output error: could not open output file {}.", file_name))?;
    Ok(BufWriter::with_capacity(options.write_buffer_size, file))
}

/// Open list output files for streaming write
pub fn open_output_lists(options: &Options) -> Result<OutputListStreams> {
    let mut streams = OutputListStreams {
        trajectory_file_stream: open_output_file(options, OUTPUT_SUFFIXES[0])?,
        trajectory_data_stream: open_output_file(options, OUTPUT_SUFFIXES[1])?,
        summary_file_stream: open_output_file(options, OUTPUT_SUFFIXES[2])?,
    };

    writeln!(streams.summary_file_stream, "index, Z, A, p, theta, reached, clipped, flight_length, comment")
        .with_context(|| format!("Output error: could not write to {}summary.output.", options.name))?;

    Ok(streams)
}

/// Write output lists for one trajectory
pub fn output_lists(output_list_streams: &mut OutputListStreams, index: usize, trajectory_input: &TrajectoryInput,
    trajectory: &Trajectory, clipped: bool, options: &Options) -> Result<()> {

    writeln!(output_list_streams.trajectory_data_stream, "{}", trajectory.len())
        .with_context(|| format!("Output error: could not write to {}trajectory_data.output.", options.name))?;

    for (x, y, z) in izip!(&trajectory.x, &trajectory.y, &trajectory.z) {
        writeln!(
            output_list_streams.trajectory_file_stream, "{},{},{},{},{}",
            index, trajectory_input.Z, x, y, z
        ).with_context(|| format!("Output error: could not write to {}trajectories.output.", options.name))?;
    }

    writeln!(
        output_list_streams.summary_file_stream, "{},{},{},{},{},{},{},{},'{}'",
        index, trajectory_input.Z, trajectory_input.A, trajectory_input.p, trajectory_input.theta,
        trajectory.reached, clipped, trajectory.flight_length, trajectory_input.comment
    ).with_context(|| format!("Output error: could not write to {}summary.output.", options.name))?;

    Ok(())
}

/// Flush output list streams
pub fn output_list_flush(output_list_streams: &mut OutputListStreams) -> Result<()> {
    output_list_streams.trajectory_file_stream.flush()?;
    output_list_streams.trajectory_data_stream.flush()?;
    output_list_streams.summary_file_stream.flush()?;
    Ok(())
}
