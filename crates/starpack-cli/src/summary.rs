use console::Style;
use starpack_core::pipeline::config::PipelineConfig;
use starpack_core::pipeline::PipelineReport;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
    error: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
            error: Style::new().red(),
        }
    }
}

pub fn print_pipeline_summary(config: &PipelineConfig, frame_count: usize) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Starpack Pipeline"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(17)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(frame_count)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );
    println!();

    if config.align {
        let detection = &config.alignment.detection;
        let search = &config.alignment.search;
        println!("  {}", s.header.apply_to("Alignment"));
        println!(
            "    {:<12}{}",
            s.label.apply_to("Reference"),
            s.value.apply_to(config.reference_index)
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Threshold"),
            s.method.apply_to(&detection.threshold)
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Stars"),
            s.value.apply_to(detection.max_stars)
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Window"),
            s.value.apply_to(format!("\u{b1}{} px", search.half_window))
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Rotation"),
            s.value.apply_to(format!(
                "{}..={}\u{b0} step {}",
                search.min_rotation, search.max_rotation, search.rotation_step
            ))
        );
        let workers = match config.alignment.max_concurrent_frames {
            0 => rayon::current_num_threads(),
            n => n,
        };
        println!(
            "    {:<12}{}",
            s.label.apply_to("Workers"),
            s.value.apply_to(workers)
        );
    } else {
        println!(
            "  {:<14}{}",
            s.header.apply_to("Alignment"),
            s.disabled.apply_to("disabled")
        );
    }
    println!();

    println!("  {}", s.header.apply_to("Stacking"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Method"),
        s.method.apply_to(&config.stacking.method)
    );
    println!();
}

pub fn print_report(report: &PipelineReport) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("Frames"));
    if let Some(threshold) = report.threshold {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Threshold"),
            s.value.apply_to(format!("{threshold:.2}"))
        );
    }
    for frame in &report.frames {
        let name = frame
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match (&frame.offset, &frame.error) {
            (_, Some(err)) => println!(
                "    {:<4}{:<24}{}",
                s.label.apply_to(frame.frame_index),
                name,
                s.error.apply_to(err)
            ),
            (Some(offset), None) => {
                let score = frame
                    .score
                    .map(|v| format!("  score {v:.3}"))
                    .unwrap_or_default();
                println!(
                    "    {:<4}{:<24}{}{}",
                    s.label.apply_to(frame.frame_index),
                    name,
                    s.value.apply_to(offset),
                    s.label.apply_to(score)
                );
            }
            (None, None) => {}
        }
    }
    println!();
    println!(
        "  Stacked {} of {} frames into {}",
        s.value.apply_to(report.stacked_frames),
        report.frames.len(),
        s.path.apply_to(report.output.display())
    );
}
