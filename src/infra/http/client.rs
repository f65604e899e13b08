use std::path::Path;
use std::time::Duration;

use reqwest::blocking::multipart::Form;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use crate::usecase::ports::api::{
    AgrupacionPorTipo, ApiError, ConsultaTabla, FechasResponse, FiltradoResponse, FiltroPortales,
    FiltroRegistros, MapaResponse, PdasResponse, TablaResponse, TraceApi,
};

const REQUEST_TIMEOUT_SECS: u64 = 120;

pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("trazas/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn url_for(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .get(self.url_for(path))
            .query(query)
            .send()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        decode(response)
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .post(self.url_for(path))
            .json(body)
            .send()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        decode(response)
    }

    fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let response = self
            .client
            .get(self.url_for(path))
            .send()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        decode_bytes(response)
    }

    fn post_bytes<B: Serialize>(&self, path: &str, body: &B) -> Result<Vec<u8>, ApiError> {
        let response = self
            .client
            .post(self.url_for(path))
            .json(body)
            .send()
            .map_err(|err| ApiError::Network(err.to_string()))?;
        decode_bytes(response)
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16(), server_message(&body)));
    }

    serde_json::from_str(&body).map_err(|err| ApiError::Malformed(err.to_string()))
}

fn decode_bytes(response: Response) -> Result<Vec<u8>, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(ApiError::Status(status.as_u16(), server_message(&body)));
    }
    let bytes = response
        .bytes()
        .map_err(|err| ApiError::Network(err.to_string()))?;
    Ok(bytes.to_vec())
}

// Mejor mensaje disponible: el campo "error" del cuerpo si lo hay.
pub fn server_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|message| message.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "Ocurrió un error al procesar la solicitud.".to_string())
}

impl TraceApi for HttpApi {
    fn pdas_por_codired(&self, cod: &str) -> Result<Vec<String>, ApiError> {
        let response: PdasResponse = self.get_json("pda_por_codired", &[("cod", cod)])?;
        Ok(response.pdas)
    }

    fn fechas_por_pda(&self, pda: &str) -> Result<Vec<String>, ApiError> {
        let response: FechasResponse = self.get_json("fechas_por_pda", &[("pda", pda)])?;
        Ok(response.fechas)
    }

    fn datos_tabla(&self, consulta: &ConsultaTabla) -> Result<TablaResponse, ApiError> {
        self.post_json("generar_mapa/datos_tabla", consulta)
    }

    fn mapa(&self, consulta: &ConsultaTabla) -> Result<MapaResponse, ApiError> {
        self.post_json("generar_mapa/get_mapa", consulta)
    }

    fn filtrar_registros(&self, filtro: &FiltroRegistros) -> Result<FiltradoResponse, ApiError> {
        self.post_json("filtrar_registros", filtro)
    }

    fn filtrar_portales(&self, filtro: &FiltroPortales) -> Result<FiltradoResponse, ApiError> {
        self.post_json("filter_data", filtro)
    }

    fn agrupar_puntos(&self) -> Result<FiltradoResponse, ApiError> {
        self.post_json("agrupar_puntos", &json!({}))
    }

    fn agrupar_portales(&self) -> Result<FiltradoResponse, ApiError> {
        self.post_json("agrupar_portales", &json!({}))
    }

    fn agrupar_por_tipo(&self, peticion: &AgrupacionPorTipo) -> Result<FiltradoResponse, ApiError> {
        self.post_json("agrupar_por_tipo", peticion)
    }

    fn subir_geojson(&self, cod: &str, path: &Path) -> Result<(), ApiError> {
        let form = Form::new()
            .text("cod", cod.to_string())
            .file("file", path)
            .map_err(|err| ApiError::Network(err.to_string()))?;

        let response = self
            .client
            .post(self.url_for("upload_geojson"))
            .multipart(form)
            .send()
            .map_err(|err| ApiError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ApiError::Status(status.as_u16(), server_message(&body)));
        }
        Ok(())
    }

    fn descargar_estadisticas(&self) -> Result<Vec<u8>, ApiError> {
        self.get_bytes("get_stadistics")
    }

    fn descargar_tabla(&self, tipo: &str) -> Result<Vec<u8>, ApiError> {
        self.post_bytes("get_table", &json!({ "type": tipo }))
    }
}
