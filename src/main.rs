use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use directories::{ProjectDirs, UserDirs};

mod app;
mod domain {
    pub mod entities {
        pub mod filter;
        pub mod row;
    }
}
mod infra {
    pub mod http {
        pub mod client;
    }
}
mod platform {
    pub mod desktop {
        pub mod blocking;
    }
}
mod ui {
    pub mod state {
        pub mod app_state;
    }
}
mod usecase {
    pub mod ports {
        pub mod api;
    }
    pub mod services {
        pub mod table_view;
        pub mod view_config;
    }
}

#[cfg(test)]
mod tests;

pub const PAGE_SIZE: usize = 50;
pub const FORMATO_FECHA: &str = "%Y-%m-%d";

fn main() {
    let webview_data_dir =
        default_webview_data_dir().expect("should resolve and create WebView2 data directory");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("Trazas"))
                .with_data_directory(webview_data_dir),
        )
        .launch(app::App);
}

pub fn api_base_url() -> String {
    std::env::var("TRAZAS_API_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string())
}

fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

fn default_webview_data_dir() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "trazas", "trazas")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    ensure_webview_data_dir(project_dirs.data_local_dir())
}

pub fn download_dir() -> Result<PathBuf> {
    let user_dirs = UserDirs::new().ok_or_else(|| anyhow!("unable to resolve user directory"))?;
    Ok(user_dirs
        .download_dir()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| user_dirs.home_dir().to_path_buf()))
}

pub fn guardar_descarga(nombre: &str, contenido: &[u8]) -> Result<PathBuf> {
    let destino = download_dir()?.join(nombre);
    std::fs::write(&destino, contenido)
        .with_context(|| format!("failed to write download: {}", destino.display()))?;
    Ok(destino)
}

// La fecha de fin es opcional; sin ella se consulta un único día.
pub fn valida_rango_fechas(inicio: &str, fin: &str) -> Result<(), String> {
    let inicio = NaiveDate::parse_from_str(inicio, FORMATO_FECHA)
        .map_err(|_| "La fecha de inicio no es válida.".to_string())?;

    if fin.is_empty() {
        return Ok(());
    }

    let fin = NaiveDate::parse_from_str(fin, FORMATO_FECHA)
        .map_err(|_| "La fecha de fin no es válida.".to_string())?;

    if fin < inicio {
        return Err("La fecha de fin debe ser igual o posterior a la de inicio.".to_string());
    }
    Ok(())
}

pub fn table_header_cell_style() -> String {
    "border: 1px solid #bbb; padding: 6px; background: #f2f2f2; position: sticky; top: 0; z-index: 10;".to_string()
}

pub fn table_container_style() -> String {
    "overflow: auto; flex: 1; border: 1px solid #bbb;".to_string()
}
