use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(port_str) =
            std::env::var("DISHSWIPE_GATEWAY_PORT").or_else(|_| std::env::var("PORT"))
            && let Ok(port) = port_str.parse::<u16>()
        {
            self.gateway.port = port;
        }

        if let Ok(host) =
            std::env::var("DISHSWIPE_GATEWAY_HOST").or_else(|_| std::env::var("HOST"))
            && !host.is_empty()
        {
            self.gateway.host = host;
        }

        if let Ok(path) = std::env::var("DISHSWIPE_DATABASE")
            && !path.is_empty()
        {
            self.store.path = path;
        }

        if let Ok(level) = std::env::var("DISHSWIPE_LOG")
            && !level.is_empty()
        {
            self.observability.log_level = level;
        }
    }
}
