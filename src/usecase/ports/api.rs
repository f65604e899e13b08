use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::entities::row::{Resumen, Row};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Network(String),
    Status(u16, String),
    Malformed(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(message) => write!(f, "error de red: {message}"),
            ApiError::Status(code, message) => {
                write!(f, "el servidor respondió {code}: {message}")
            }
            ApiError::Malformed(message) => {
                write!(f, "respuesta inesperada del servidor: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TablaResponse {
    #[serde(default)]
    pub resumen: Resumen,
    #[serde(default)]
    pub tabla: Vec<Row>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FiltradoResponse {
    #[serde(default)]
    pub tabla: Vec<Row>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl FiltradoResponse {
    pub fn aviso(&self) -> Option<String> {
        if self.warnings.is_empty() {
            None
        } else {
            Some(self.warnings.join(" "))
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MapaResponse {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PdasResponse {
    #[serde(default)]
    pub pdas: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FechasResponse {
    #[serde(default)]
    pub fechas: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConsultaTabla {
    pub cod: String,
    pub pda: String,
    pub ini: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fin: Option<String>,
}

// Cuerpo de /filtrar_registros; los criterios inactivos viajan en blanco.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FiltroRegistros {
    pub distancia: String,
    #[serde(rename = "signoDistancia")]
    pub signo_distancia: String,
    pub tiempo: String,
    #[serde(rename = "signoTiempo")]
    pub signo_tiempo: String,
    pub velocidad: String,
    #[serde(rename = "signoVelocidad")]
    pub signo_velocidad: String,
}

// Cuerpo de /filter_data (vista de portales). El servidor lee el tiempo
// máximo de clúster bajo dos nombres, por eso viaja duplicado.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FiltroPortales {
    pub cod: String,
    pub pda: String,
    #[serde(rename = "signoPDA")]
    pub signo_pda: String,
    pub diametro: String,
    #[serde(rename = "numPts")]
    pub num_pts: String,
    #[serde(rename = "maxTime")]
    pub max_time: String,
    #[serde(rename = "maxTimeClus")]
    pub max_time_clus: String,
    #[serde(rename = "timeAcc")]
    pub time_acc: String,
    #[serde(rename = "signoTimeAcc")]
    pub signo_time_acc: String,
    #[serde(rename = "timeMean")]
    pub time_mean: String,
    #[serde(rename = "signoTimeMean")]
    pub signo_time_mean: String,
}

impl FiltroPortales {
    pub fn tiene_algun_filtro(&self) -> bool {
        !self.pda.is_empty()
            || !self.diametro.is_empty()
            || !self.num_pts.is_empty()
            || !self.max_time.is_empty()
            || !self.time_acc.is_empty()
            || !self.time_mean.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgrupacionPorTipo {
    pub agrupamiento: String,
    pub cod: String,
}

pub trait TraceApi: Send + Sync {
    fn pdas_por_codired(&self, cod: &str) -> Result<Vec<String>, ApiError>;
    fn fechas_por_pda(&self, pda: &str) -> Result<Vec<String>, ApiError>;
    fn datos_tabla(&self, consulta: &ConsultaTabla) -> Result<TablaResponse, ApiError>;
    fn mapa(&self, consulta: &ConsultaTabla) -> Result<MapaResponse, ApiError>;
    fn filtrar_registros(&self, filtro: &FiltroRegistros) -> Result<FiltradoResponse, ApiError>;
    fn filtrar_portales(&self, filtro: &FiltroPortales) -> Result<FiltradoResponse, ApiError>;
    fn agrupar_puntos(&self) -> Result<FiltradoResponse, ApiError>;
    fn agrupar_portales(&self) -> Result<FiltradoResponse, ApiError>;
    fn agrupar_por_tipo(&self, peticion: &AgrupacionPorTipo) -> Result<FiltradoResponse, ApiError>;
    fn subir_geojson(&self, cod: &str, path: &Path) -> Result<(), ApiError>;
    fn descargar_estadisticas(&self) -> Result<Vec<u8>, ApiError>;
    fn descargar_tabla(&self, tipo: &str) -> Result<Vec<u8>, ApiError>;
}
