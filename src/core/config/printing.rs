use crate::core::config::data::{path_display, Config};
use crate::core::constants::DEFAULT_BASE_URL;

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.base_url {
            Some(url) => println!("  base-url: {url}"),
            None => println!("  base-url: (unset, using {DEFAULT_BASE_URL})"),
        }
        match &self.log_file {
            Some(path) => println!("  log-file: {path}"),
            None => println!("  log-file: (unset)"),
        }
        if let Ok(path) = Config::get_config_path() {
            println!("  config file: {}", path_display(path));
        }
    }
}
