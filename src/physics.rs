use super::*;

/// Loads the field map and applies the run configuration to a new tracer.
pub fn build_tracer(options: &Options, geometry_input: &GeometryInput, magnet_parameters: &MagnetParameters) -> Result<Tracer> {
    let mut tracer = Tracer::new();

    tracer.load_field(&magnet_parameters.field_file, magnet_parameters.scale, &magnet_parameters.grid_parameters())
        .with_context(|| format!("Input error: could not load magnet field {}.", magnet_parameters.field_file.display()))?;

    if let Some(central_field) = magnet_parameters.central_field {
        tracer.scale_central_field_to(central_field)
            .with_context(|| format!("Input error: could not scale central field to {} T.", central_field))?;
    }

    tracer.configure(options, geometry_input);
    Ok(tracer)
}

/// Traces one trajectory and clips it at the first blocked sample. Also returns whether clipping happened.
pub fn trace_trajectory(tracer: &mut Tracer, trajectory_input: &TrajectoryInput, bounds: &Bounds) -> Result<(Trajectory, bool)> {
    tracer.trace(&trajectory_input.position, &trajectory_input.momentum, trajectory_input.Z)?;

    let mut trajectory = tracer.trajectory();
    let visible_length = bounds.visible_length(&trajectory);
    let clipped = visible_length < trajectory.len();
    trajectory.truncate(visible_length);

    Ok((trajectory, clipped))
}

/// Traces all trajectories, on `num_threads` workers that each own a clone of `tracer`.
pub fn trace_all(trajectory_inputs: &[TrajectoryInput], tracer: &Tracer, bounds: &Bounds, num_threads: usize,
    bar: &ProgressBar) -> Result<Vec<(Trajectory, bool)>> {

    if num_threads > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .context("Could not initialize thread pool.")?;

        pool.install(|| {
            trajectory_inputs.par_iter()
                .map_init(|| tracer.clone(), |tracer, trajectory_input| {
                    bar.inc(1);
                    trace_trajectory(tracer, trajectory_input, bounds)
                })
                .collect()
        })
    } else {
        let mut tracer = tracer.clone();
        trajectory_inputs.iter()
            .map(|trajectory_input| {
                bar.inc(1);
                trace_trajectory(&mut tracer, trajectory_input, bounds)
            })
            .collect()
    }
}

/// Traces every trajectory, prints flight lengths and writes the list outputs.
pub fn trace_loop(trajectory_inputs: Vec<TrajectoryInput>, tracer: Tracer, options: Options, geometry_input: GeometryInput) -> Result<output::Summary> {

    println!("Processing {} trajectories...", trajectory_inputs.len());
    println!("B_z(0,0,0) = {:.2} T", tracer.central_field());
    println!("{}", tracer.end_plane());

    let bounds = Bounds::new(&options, &geometry_input);
    let mut output_list_streams = output::open_output_lists(&options)?;
    let mut summary = output::Summary::new();

    if options.num_threads > 1 {
        println!("Initializing with {} threads...", options.num_threads);
    }

    //Create and configure progress bar
    let bar: ProgressBar = ProgressBar::new(trajectory_inputs.len() as u64);
    bar.set_style(ProgressStyle::default_bar()
        .template("[{elapsed_precise}][{bar:40.cyan/blue}][{eta_precise}] {percent}%")
        .progress_chars("#>-"));

    let results = trace_all(&trajectory_inputs, &tracer, &bounds, options.num_threads, &bar)?;
    bar.finish();

    for (index, (trajectory_input, (trajectory, clipped))) in trajectory_inputs.iter().zip(&results).enumerate() {
        if !trajectory.reached {
            warn!("Trajectory {} ({}) did not reach the exit plane within {} steps.",
                index, trajectory_input.comment, options.max_point);
        }
        println!("fl[{}] = {:.1} mm", index, trajectory.flight_length);

        summary.update(trajectory, *clipped);
        output::output_lists(&mut output_list_streams, index, trajectory_input, trajectory, *clipped, &options)?;
    }

    //Flush all file streams before dropping to ensure all data is written
    output::output_list_flush(&mut output_list_streams)?;

    println!("{}", summary);
    println!("Finished!");
    Ok(summary)
}
