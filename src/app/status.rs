use crate::config::Config;

pub fn render_status(config: &Config, store: &str, store_healthy: bool) -> String {
    let gesture = &config.gesture;
    let mut lines = vec![
        format!("◆ DishSwipe {}", env!("CARGO_PKG_VERSION")),
        String::new(),
        format!("  Config     {}", config.config_path.display()),
        format!("  Data       {}", config.data_dir.display()),
        format!(
            "  Gateway    {}:{}",
            config.gateway.host, config.gateway.port
        ),
        format!(
            "  Store      {store} ({})",
            if store_healthy { "healthy" } else { "unreachable" }
        ),
    ];

    if config.store.backend == "sqlite" {
        lines.push(format!(
            "  Database   {}",
            config.database_path().display()
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "  Swipe      |velocity| >= {} or |offset| > {}",
        gesture.velocity_threshold, gesture.offset_threshold
    ));
    lines.push(format!(
        "  Exit       {}px over {}ms",
        gesture.exit_distance, gesture.exit_duration_ms
    ));
    lines.push(format!(
        "  Spring     stiffness {} damping {}",
        gesture.spring_stiffness, gesture.spring_damping
    ));
    lines.push(format!(
        "  Log        {} ({})",
        config.observability.log_level, config.observability.backend
    ));

    lines.join("\n")
}
