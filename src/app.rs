use std::sync::Arc;

use dioxus::prelude::*;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

use crate::domain::entities::filter::{Comparator, Criterion, FilterCriteria};
use crate::infra::http::client::HttpApi;
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::state::app_state::AppState;
use crate::usecase::ports::api::{
    AgrupacionPorTipo, ConsultaTabla, FiltroPortales, FiltroRegistros, TraceApi,
};
use crate::usecase::services::table_view::ActiveSet;
use crate::usecase::services::view_config::{portales_view, puntos_view};
use crate::{
    api_base_url, guardar_descarga, table_container_style, table_header_cell_style,
    valida_rango_fechas,
};

const COMPARADORES: [(Comparator, &str); 6] = [
    (Comparator::Menor, "<"),
    (Comparator::MenorIgual, "≤"),
    (Comparator::Igual, "="),
    (Comparator::NoIgual, "≠"),
    (Comparator::Mayor, ">"),
    (Comparator::MayorIgual, "≥"),
];

fn alerta(mensaje: &str) {
    let _ = MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title("Trazas")
        .set_description(mensaje)
        .set_buttons(MessageButtons::Ok)
        .show();
}

#[component]
fn SignoSelect(value: String, disabled: bool, on_change: EventHandler<String>) -> Element {
    rsx! {
        select {
            disabled,
            value: "{value}",
            onchange: move |event| on_change.call(event.value()),
            {COMPARADORES.iter().map(|(comparador, simbolo)| {
                rsx!(
                    option { value: comparador.token(), "{simbolo}" }
                )
            })}
        }
    }
}

#[component]
fn DropdownSelect(
    label: &'static str,
    placeholder: &'static str,
    empty_message: &'static str,
    options: Vec<String>,
    selected: Option<String>,
    disabled: bool,
    on_select: EventHandler<String>,
) -> Element {
    let mut open = use_signal(|| false);
    let selected_label = selected.unwrap_or_else(|| placeholder.to_string());

    rsx! {
        div {
            style: "position: relative; display: inline-flex; align-items: center; gap: 6px;",
            span { "{label}" }
            button {
                style: "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;",
                disabled,
                onclick: move |event| {
                    event.stop_propagation();
                    let next = !open();
                    open.set(next);
                },
                "{selected_label}"
            }

            if open() {
                div {
                    style: "position: absolute; left: 0; top: 32px; min-width: 200px; max-height: 320px; overflow-y: auto; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200;",
                    onclick: move |event| event.stop_propagation(),
                    if options.is_empty() {
                        div { style: "padding: 8px 10px; color: #888;", "{empty_message}" }
                    }
                    {options.iter().map(|opcion| {
                        let value = opcion.clone();
                        rsx!(
                            div {
                                style: "padding: 8px 10px; cursor: pointer;",
                                onclick: move |_| {
                                    on_select.call(value.clone());
                                    open.set(false);
                                },
                                "{opcion}"
                            }
                        )
                    })}
                }
            }
        }
    }
}

#[component]
pub fn App() -> Element {
    let AppState {
        mut codired,
        mut pda,
        mut pdas_disponibles,
        mut fechas_disponibles,
        mut fecha_inicio,
        mut fecha_fin,
        mut aviso_fecha,
        mut engine,
        mut vista_portales,
        mut resumen,
        mut titulo,
        mut mapa_url,
        mut filtro_distancia,
        mut signo_distancia,
        mut filtro_tiempo,
        mut signo_tiempo,
        mut filtro_velocidad,
        mut signo_velocidad,
        mut filtro_pda,
        mut signo_pda,
        mut filtro_diametro,
        mut filtro_num_pts,
        mut filtro_max_time,
        mut filtro_time_acc,
        mut signo_time_acc,
        mut filtro_time_mean,
        mut signo_time_mean,
        mut agrupamiento,
        mut mostrar_tabla,
        mut busy,
        mut status,
    } = AppState::new();

    let api = match HttpApi::new(api_base_url()) {
        Ok(api) => Arc::new(api),
        Err(err) => {
            return rsx! {
                div {
                    p { "No se pudo crear el cliente HTTP: {err}" }
                }
            };
        }
    };

    let api_for_pdas = api.clone();
    let api_for_fechas = api.clone();
    let api_for_generar = api.clone();
    let api_for_filtrar = api.clone();
    let api_for_filtrar_portales = api.clone();
    let api_for_agrupar_puntos = api.clone();
    let api_for_agrupar_portales = api.clone();
    let api_for_agrupar_tipo = api.clone();
    let api_for_geojson = api.clone();
    let api_for_estadisticas = api.clone();
    let api_for_tabla_csv = api.clone();

    let config = if vista_portales() {
        portales_view()
    } else {
        puntos_view()
    };
    let pagina_render = engine().render_page(&config);
    let ancho_tabla = pagina_render.headers.len().max(1);
    let resumen_actual = resumen();
    let mapa_actual = mapa_url();
    let fechas_actuales = fechas_disponibles();

    rsx! {
        div {
            style: "height: 100vh; display: flex; flex-direction: column; overflow: hidden; padding: 12px; gap: 8px; font-family: sans-serif;",

            nav {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; padding: 8px 0;",

                label { "Unidad " }
                input {
                    disabled: busy(),
                    value: codired(),
                    placeholder: "Código de unidad",
                    onchange: move |event| {
                        let cod = event.value().trim().to_string();
                        *codired.write() = cod.clone();
                        *pda.write() = String::new();
                        *pdas_disponibles.write() = Vec::new();
                        *fechas_disponibles.write() = Vec::new();
                        *fecha_inicio.write() = String::new();
                        *fecha_fin.write() = String::new();
                        *aviso_fecha.write() = false;

                        if cod.is_empty() {
                            *status.write() = "Introduce un código de unidad".to_string();
                            return;
                        }

                        let api = api_for_pdas.clone();
                        spawn(async move {
                            *busy.write() = true;
                            *status.write() = "Cargando…".to_string();

                            match run_blocking(move || api.pdas_por_codired(&cod)).await {
                                Ok(pdas) => {
                                    *status.write() = if pdas.is_empty() {
                                        "No hay PDAs disponibles".to_string()
                                    } else {
                                        format!("{} PDAs disponibles", pdas.len())
                                    };
                                    *pdas_disponibles.write() = pdas;
                                }
                                Err(err) => {
                                    *status.write() = format!("PDAs no encontradas: {err}");
                                }
                            }

                            *busy.write() = false;
                        });
                    },
                }

                DropdownSelect {
                    label: "PDA",
                    placeholder: "Selecciona una PDA",
                    empty_message: "No hay PDAs disponibles",
                    options: pdas_disponibles(),
                    selected: if pda().is_empty() { None } else { Some(pda()) },
                    disabled: busy() || pdas_disponibles().is_empty(),
                    on_select: move |seleccion: String| {
                        *pda.write() = seleccion.clone();
                        *fecha_inicio.write() = String::new();
                        *fecha_fin.write() = String::new();
                        *aviso_fecha.write() = false;

                        let api = api_for_fechas.clone();
                        spawn(async move {
                            *busy.write() = true;
                            *status.write() = "Procesando fechas válidas.".to_string();

                            match run_blocking(move || api.fechas_por_pda(&seleccion)).await {
                                Ok(fechas) => {
                                    *status.write() = if fechas.is_empty() {
                                        "La PDA no tiene fechas con datos".to_string()
                                    } else {
                                        "Selecciona el rango de fechas".to_string()
                                    };
                                    *fechas_disponibles.write() = fechas;
                                }
                                Err(err) => {
                                    *fechas_disponibles.write() = Vec::new();
                                    *status.write() =
                                        format!("Error al cargar las fechas: {err}");
                                }
                            }

                            *busy.write() = false;
                        });
                    },
                }

                label { "Inicio " }
                input {
                    r#type: "date",
                    disabled: busy() || fechas_actuales.is_empty(),
                    value: fecha_inicio(),
                    min: fechas_actuales.first().cloned().unwrap_or_default(),
                    max: fechas_actuales.last().cloned().unwrap_or_default(),
                    onchange: move |event| {
                        let valor = event.value();
                        *aviso_fecha.write() =
                            !valor.is_empty() && !fechas_disponibles().contains(&valor);
                        *fecha_inicio.write() = valor;
                    },
                }

                label { "Fin " }
                input {
                    r#type: "date",
                    disabled: busy() || fechas_actuales.is_empty(),
                    value: fecha_fin(),
                    min: fechas_actuales.first().cloned().unwrap_or_default(),
                    max: fechas_actuales.last().cloned().unwrap_or_default(),
                    onchange: move |event| {
                        let valor = event.value();
                        *aviso_fecha.write() =
                            !valor.is_empty() && !fechas_disponibles().contains(&valor);
                        *fecha_fin.write() = valor;
                    },
                }

                if aviso_fecha() {
                    span { style: "color: #cc3333;", "Fecha sin datos para esta PDA" }
                }

                button {
                    disabled: busy(),
                    onclick: move |_| {
                        let cod = codired();
                        let pda_actual = pda();
                        let ini = fecha_inicio();
                        let fin = fecha_fin();

                        if cod.is_empty() {
                            alerta("Debes introducir un código de unidad.");
                            return;
                        }
                        if pda_actual.is_empty() {
                            alerta("Debes seleccionar una PDA.");
                            return;
                        }
                        if ini.is_empty() {
                            alerta("Debes seleccionar una fecha de inicio.");
                            return;
                        }
                        if let Err(mensaje) = valida_rango_fechas(&ini, &fin) {
                            alerta(&mensaje);
                            return;
                        }

                        let consulta = ConsultaTabla {
                            cod: cod.clone(),
                            pda: pda_actual.clone(),
                            ini: ini.clone(),
                            fin: if fin.is_empty() { None } else { Some(fin.clone()) },
                        };

                        let api = api_for_generar.clone();
                        spawn(async move {
                            *busy.write() = true;
                            *status.write() = "Generando tabla de datos".to_string();

                            let api_datos = api.clone();
                            let consulta_datos = consulta.clone();
                            match run_blocking(move || api_datos.datos_tabla(&consulta_datos))
                                .await
                            {
                                Ok(respuesta) => {
                                    engine.write().load(respuesta.tabla);
                                    *vista_portales.write() = false;
                                    *resumen.write() = Some(respuesta.resumen);
                                    *titulo.write() = if fin.is_empty() {
                                        format!("{pda_actual} — {ini}")
                                    } else {
                                        format!("{pda_actual} — {ini} → {fin}")
                                    };
                                    *mostrar_tabla.write() = true;
                                    *status.write() = "Tabla generada".to_string();

                                    match run_blocking(move || api.mapa(&consulta)).await {
                                        Ok(mapa) => {
                                            *mapa_url.write() = Some(mapa.url);
                                        }
                                        Err(err) => {
                                            *status.write() = format!(
                                                "Tabla generada, pero el mapa falló: {err}"
                                            );
                                        }
                                    }
                                }
                                Err(err) => {
                                    alerta(&format!(
                                        "Ocurrió un error al procesar la solicitud: {err}"
                                    ));
                                    *status.write() =
                                        format!("Error al generar la tabla: {err}");
                                }
                            }

                            *busy.write() = false;
                        });
                    },
                    "Generar"
                }

                button {
                    disabled: busy(),
                    onclick: move |_| {
                        let cod = codired();
                        if cod.is_empty() {
                            alerta("Debes introducir un código de unidad.");
                            return;
                        }

                        let Some(file_path) = FileDialog::new()
                            .add_filter("GeoJSON", &["geojson", "json"])
                            .pick_file() else {
                            *status.write() = "Subida cancelada".to_string();
                            return;
                        };

                        let api = api_for_geojson.clone();
                        spawn(async move {
                            *busy.write() = true;
                            *status.write() = format!("Subiendo {}", file_path.display());

                            match run_blocking(move || api.subir_geojson(&cod, &file_path)).await
                            {
                                Ok(()) => {
                                    *status.write() =
                                        "GeoJSON de referencia subido".to_string();
                                }
                                Err(err) => {
                                    *status.write() =
                                        format!("Error al subir el GeoJSON: {err}");
                                }
                            }

                            *busy.write() = false;
                        });
                    },
                    "Subir GeoJSON"
                }

                span { " {status}" }
            }

            if let Some(res) = resumen_actual {
                div {
                    style: "display: flex; gap: 16px; align-items: center; flex-wrap: wrap;",
                    strong { "{titulo}" }
                    span { "Puntos: {res.puntos_totales}" }
                    span { "Distancia total: {res.distancia_total}" }
                    span { "Tiempo total: {res.tiempo_total}" }
                    span { "Velocidad media: {res.velocidad_media}" }
                }
            }

            if vista_portales() {
                div {
                    style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap;",

                    label { "PDA " }
                    select {
                        disabled: busy(),
                        value: signo_pda(),
                        onchange: move |event| {
                            *signo_pda.write() = event.value();
                        },
                        option { value: "igual", "=" }
                        option { value: "no-igual", "≠" }
                    }
                    input {
                        disabled: busy(),
                        value: filtro_pda(),
                        placeholder: "Código PDA",
                        onchange: move |event| {
                            *filtro_pda.write() = event.value();
                        },
                    }

                    label { "Diámetro " }
                    input {
                        r#type: "number",
                        disabled: busy(),
                        value: filtro_diametro(),
                        placeholder: "m",
                        onchange: move |event| {
                            *filtro_diametro.write() = event.value();
                        },
                    }

                    label { "Puntos por clúster " }
                    input {
                        r#type: "number",
                        disabled: busy(),
                        value: filtro_num_pts(),
                        onchange: move |event| {
                            *filtro_num_pts.write() = event.value();
                        },
                    }

                    label { "Tiempo máx. clúster " }
                    input {
                        r#type: "number",
                        disabled: busy(),
                        value: filtro_max_time(),
                        placeholder: "sec",
                        onchange: move |event| {
                            *filtro_max_time.write() = event.value();
                        },
                    }

                    label { "Tiempo acumulado " }
                    SignoSelect {
                        value: signo_time_acc(),
                        disabled: busy(),
                        on_change: move |valor| {
                            *signo_time_acc.write() = valor;
                        },
                    }
                    input {
                        r#type: "number",
                        disabled: busy(),
                        value: filtro_time_acc(),
                        placeholder: "sec",
                        onchange: move |event| {
                            *filtro_time_acc.write() = event.value();
                        },
                    }

                    label { "Tiempo medio " }
                    SignoSelect {
                        value: signo_time_mean(),
                        disabled: busy(),
                        on_change: move |valor| {
                            *signo_time_mean.write() = valor;
                        },
                    }
                    input {
                        r#type: "number",
                        disabled: busy(),
                        value: filtro_time_mean(),
                        placeholder: "sec",
                        onchange: move |event| {
                            *filtro_time_mean.write() = event.value();
                        },
                    }

                    button {
                        disabled: busy() || !mostrar_tabla(),
                        onclick: move |_| {
                            let filtro = FiltroPortales {
                                cod: codired(),
                                pda: filtro_pda().trim().to_string(),
                                signo_pda: signo_pda(),
                                diametro: filtro_diametro(),
                                num_pts: filtro_num_pts(),
                                max_time: filtro_max_time(),
                                max_time_clus: filtro_max_time(),
                                time_acc: filtro_time_acc(),
                                signo_time_acc: signo_time_acc(),
                                time_mean: filtro_time_mean(),
                                signo_time_mean: signo_time_mean(),
                            };

                            if !filtro.tiene_algun_filtro() {
                                alerta("Debes seleccionar algún filtro.");
                                return;
                            }

                            let criteria = FilterCriteria::new(vec![
                                Criterion::new(
                                    "time_accumulated",
                                    &filtro.signo_time_acc,
                                    &filtro.time_acc,
                                ),
                                Criterion::new(
                                    "time_mean",
                                    &filtro.signo_time_mean,
                                    &filtro.time_mean,
                                ),
                            ]);

                            let api = api_for_filtrar_portales.clone();
                            spawn(async move {
                                *busy.write() = true;
                                *status.write() = "Filtrando portales".to_string();

                                match run_blocking(move || api.filtrar_portales(&filtro)).await {
                                    Ok(respuesta) => {
                                        let aviso = respuesta.aviso();
                                        match engine
                                            .write()
                                            .apply_filter(&criteria, Some(respuesta.tabla))
                                        {
                                            Ok(()) => {
                                                if let Some(url) = respuesta.url {
                                                    if !url.is_empty() {
                                                        *mapa_url.write() = Some(url);
                                                    }
                                                }
                                                *status.write() = aviso.unwrap_or_else(|| {
                                                    "Filtros aplicados".to_string()
                                                });
                                            }
                                            Err(err) => {
                                                alerta(&err.to_string());
                                            }
                                        }
                                    }
                                    Err(err) => {
                                        alerta(&format!(
                                            "Ocurrió un error al procesar la solicitud: {err}"
                                        ));
                                        *status.write() = format!("Error al filtrar: {err}");
                                    }
                                }

                                *busy.write() = false;
                            });
                        },
                        "Filtrar portales"
                    }

                    button {
                        disabled: busy(),
                        onclick: move |_| {
                            *filtro_pda.write() = String::new();
                            *signo_pda.write() = "igual".to_string();
                            *filtro_diametro.write() = String::new();
                            *filtro_num_pts.write() = String::new();
                            *filtro_max_time.write() = String::new();
                            *filtro_time_acc.write() = String::new();
                            *signo_time_acc.write() = "menor".to_string();
                            *filtro_time_mean.write() = String::new();
                            *signo_time_mean.write() = "menor".to_string();
                            engine.write().clear_filter();
                            *status.write() = "Filtros limpiados".to_string();
                        },
                        "Limpiar filtros"
                    }
                }
            } else {
                div {
                    style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap;",

                    label { "Distancia " }
                    SignoSelect {
                        value: signo_distancia(),
                        disabled: busy(),
                        on_change: move |valor| {
                            *signo_distancia.write() = valor;
                        },
                    }
                    input {
                        r#type: "number",
                        disabled: busy(),
                        value: filtro_distancia(),
                        placeholder: "m",
                        onchange: move |event| {
                            *filtro_distancia.write() = event.value();
                        },
                    }

                    label { "Tiempo " }
                    SignoSelect {
                        value: signo_tiempo(),
                        disabled: busy(),
                        on_change: move |valor| {
                            *signo_tiempo.write() = valor;
                        },
                    }
                    input {
                        r#type: "number",
                        disabled: busy(),
                        value: filtro_tiempo(),
                        placeholder: "sec",
                        onchange: move |event| {
                            *filtro_tiempo.write() = event.value();
                        },
                    }

                    label { "Velocidad " }
                    SignoSelect {
                        value: signo_velocidad(),
                        disabled: busy(),
                        on_change: move |valor| {
                            *signo_velocidad.write() = valor;
                        },
                    }
                    input {
                        r#type: "number",
                        disabled: busy(),
                        value: filtro_velocidad(),
                        placeholder: "km/h",
                        onchange: move |event| {
                            *filtro_velocidad.write() = event.value();
                        },
                    }

                    button {
                        disabled: busy() || !mostrar_tabla(),
                        onclick: move |_| {
                            let distancia = filtro_distancia();
                            let tiempo = filtro_tiempo();
                            let velocidad = filtro_velocidad();

                            let criteria = FilterCriteria::new(vec![
                                Criterion::new("distancia", &signo_distancia(), &distancia),
                                Criterion::new("tiempo", &signo_tiempo(), &tiempo),
                                Criterion::new("velocidad", &signo_velocidad(), &velocidad),
                            ]);

                            if !criteria.has_active() {
                                alerta("Debes seleccionar algún filtro.");
                                return;
                            }

                            let filtro = FiltroRegistros {
                                distancia,
                                signo_distancia: signo_distancia(),
                                tiempo,
                                signo_tiempo: signo_tiempo(),
                                velocidad,
                                signo_velocidad: signo_velocidad(),
                            };

                            let api = api_for_filtrar.clone();
                            spawn(async move {
                                *busy.write() = true;
                                *status.write() = "Filtrando registros".to_string();

                                // El filtrado del servidor es el canónico: sus filas
                                // sustituyen a la evaluación local de los criterios.
                                match run_blocking(move || api.filtrar_registros(&filtro)).await
                                {
                                    Ok(respuesta) => {
                                        let aviso = respuesta.aviso();
                                        match engine
                                            .write()
                                            .apply_filter(&criteria, Some(respuesta.tabla))
                                        {
                                            Ok(()) => {
                                                if let Some(url) = respuesta.url {
                                                    if !url.is_empty() {
                                                        *mapa_url.write() = Some(url);
                                                    }
                                                }
                                                *status.write() = aviso.unwrap_or_else(|| {
                                                    "Filtros aplicados".to_string()
                                                });
                                            }
                                            Err(err) => {
                                                alerta(&err.to_string());
                                            }
                                        }
                                    }
                                    Err(err) => {
                                        alerta(&format!(
                                            "Ocurrió un error al procesar la solicitud: {err}"
                                        ));
                                        *status.write() = format!("Error al filtrar: {err}");
                                    }
                                }

                                *busy.write() = false;
                            });
                        },
                        "Filtrar"
                    }

                    button {
                        disabled: busy(),
                        onclick: move |_| {
                            *filtro_distancia.write() = String::new();
                            *filtro_tiempo.write() = String::new();
                            *filtro_velocidad.write() = String::new();
                            *signo_distancia.write() = "menor".to_string();
                            *signo_tiempo.write() = "menor".to_string();
                            *signo_velocidad.write() = "menor".to_string();
                            engine.write().clear_filter();
                            *status.write() = "Filtros limpiados".to_string();
                        },
                        "Limpiar filtros"
                    }
                }
            }

            div {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap;",

                button {
                    disabled: busy() || !mostrar_tabla(),
                    onclick: move |_| {
                        let api = api_for_agrupar_puntos.clone();
                        spawn(async move {
                            *busy.write() = true;
                            *status.write() = "Agrupando puntos".to_string();

                            match run_blocking(move || api.agrupar_puntos()).await {
                                Ok(respuesta) => {
                                    let aviso = respuesta.aviso();
                                    engine.write().load(respuesta.tabla);
                                    *vista_portales.write() = false;
                                    if let Some(url) = respuesta.url {
                                        if !url.is_empty() {
                                            *mapa_url.write() = Some(url);
                                        }
                                    }
                                    *status.write() = aviso
                                        .unwrap_or_else(|| "Puntos agrupados".to_string());
                                }
                                Err(err) => {
                                    alerta(&format!(
                                        "Ocurrió un error al procesar la solicitud: {err}"
                                    ));
                                    *status.write() =
                                        format!("Error al agrupar puntos: {err}");
                                }
                            }

                            *busy.write() = false;
                        });
                    },
                    "Agrupar puntos"
                }

                button {
                    disabled: busy() || !mostrar_tabla(),
                    onclick: move |_| {
                        let api = api_for_agrupar_portales.clone();
                        spawn(async move {
                            *busy.write() = true;
                            *status.write() = "Agrupando portales".to_string();

                            match run_blocking(move || api.agrupar_portales()).await {
                                Ok(respuesta) => {
                                    let aviso = respuesta.aviso();
                                    engine.write().load(respuesta.tabla);
                                    *vista_portales.write() = true;
                                    if let Some(url) = respuesta.url {
                                        if !url.is_empty() {
                                            *mapa_url.write() = Some(url);
                                        }
                                    }
                                    *status.write() = aviso
                                        .unwrap_or_else(|| "Portales agrupados".to_string());
                                }
                                Err(err) => {
                                    alerta(&format!(
                                        "Ocurrió un error al procesar la solicitud: {err}"
                                    ));
                                    *status.write() =
                                        format!("Error al agrupar portales: {err}");
                                }
                            }

                            *busy.write() = false;
                        });
                    },
                    "Agrupar portales"
                }

                select {
                    disabled: busy(),
                    value: agrupamiento(),
                    onchange: move |event| {
                        *agrupamiento.write() = event.value();
                    },
                    option { value: "tiempo", "Por tiempo" }
                    option { value: "diametro", "Por diámetro" }
                }
                button {
                    disabled: busy() || !mostrar_tabla(),
                    onclick: move |_| {
                        let peticion = AgrupacionPorTipo {
                            agrupamiento: agrupamiento(),
                            cod: codired(),
                        };

                        let api = api_for_agrupar_tipo.clone();
                        spawn(async move {
                            *busy.write() = true;
                            *status.write() = "Agrupando por tipo".to_string();

                            match run_blocking(move || api.agrupar_por_tipo(&peticion)).await {
                                Ok(respuesta) => {
                                    let aviso = respuesta.aviso();
                                    engine.write().load(respuesta.tabla);
                                    *vista_portales.write() = false;
                                    if let Some(url) = respuesta.url {
                                        if !url.is_empty() {
                                            *mapa_url.write() = Some(url);
                                        }
                                    }
                                    *status.write() = aviso
                                        .unwrap_or_else(|| "Agrupado por tipo".to_string());
                                }
                                Err(err) => {
                                    alerta(&format!(
                                        "Ocurrió un error al procesar la solicitud: {err}"
                                    ));
                                    *status.write() =
                                        format!("Error al agrupar por tipo: {err}");
                                }
                            }

                            *busy.write() = false;
                        });
                    },
                    "Agrupar por tipo"
                }

                button {
                    disabled: busy(),
                    onclick: move |_| {
                        let api = api_for_estadisticas.clone();
                        spawn(async move {
                            *busy.write() = true;
                            *status.write() = "Descargando estadísticas".to_string();

                            let resultado = run_blocking(move || {
                                api.descargar_estadisticas()
                                    .map_err(anyhow::Error::from)
                                    .and_then(|bytes| {
                                        guardar_descarga("estadisticas.pdf", &bytes)
                                    })
                            })
                            .await;

                            match resultado {
                                Ok(destino) => {
                                    *status.write() =
                                        format!("Guardado en {}", destino.display());
                                }
                                Err(err) => {
                                    alerta("No se pudo descargar el PDF");
                                    *status.write() =
                                        format!("No se pudo descargar el PDF: {err}");
                                }
                            }

                            *busy.write() = false;
                        });
                    },
                    "Descargar estadísticas (PDF)"
                }

                button {
                    disabled: busy() || !mostrar_tabla(),
                    onclick: move |_| {
                        let tipo = if engine().selector() == ActiveSet::Filtrados {
                            "filtrada"
                        } else {
                            "original"
                        };

                        let api = api_for_tabla_csv.clone();
                        spawn(async move {
                            *busy.write() = true;
                            *status.write() = "Descargando tabla".to_string();

                            let resultado = run_blocking(move || {
                                api.descargar_tabla(tipo)
                                    .map_err(anyhow::Error::from)
                                    .and_then(|bytes| guardar_descarga("tabla.csv", &bytes))
                            })
                            .await;

                            match resultado {
                                Ok(destino) => {
                                    *status.write() =
                                        format!("Guardado en {}", destino.display());
                                }
                                Err(err) => {
                                    alerta("No se pudo descargar la tabla");
                                    *status.write() =
                                        format!("No se pudo descargar la tabla: {err}");
                                }
                            }

                            *busy.write() = false;
                        });
                    },
                    "Descargar tabla (CSV)"
                }
            }

            if let Some(url) = mapa_actual {
                iframe {
                    src: "{url}",
                    style: "width: 100%; height: 320px; border: 1px solid #bbb; flex-shrink: 0;",
                }
            }

            if mostrar_tabla() {
                div {
                    style: table_container_style(),
                    table {
                        style: "border-collapse: collapse; width: 100%;",
                        thead {
                            tr {
                                for header in pagina_render.headers.clone() {
                                    th { style: table_header_cell_style(), "{header}" }
                                }
                            }
                        }
                        tbody {
                            if let Some(aviso_texto) = pagina_render.aviso.clone() {
                                tr {
                                    td {
                                        style: "border: 1px solid #bbb; padding: 15px; text-align: center; color: #cc3333;",
                                        colspan: "{ancho_tabla}",
                                        "⚠️ {aviso_texto}"
                                    }
                                }
                            } else {
                                for fila in pagina_render.filas.clone() {
                                    tr {
                                        for celda in fila {
                                            td { style: "border: 1px solid #bbb; padding: 6px;", "{celda}" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                if pagina_render.mostrar_paginador {
                    div {
                        style: "display: flex; gap: 12px; align-items: center; justify-content: center; padding: 6px 0;",
                        button {
                            style: if pagina_render.mostrar_anterior {
                                "visibility: visible;"
                            } else {
                                "visibility: hidden;"
                            },
                            disabled: busy() || !pagina_render.mostrar_anterior,
                            onclick: move |_| {
                                engine.write().prev_page();
                            },
                            "Anterior"
                        }
                        span { "{pagina_render.etiqueta}" }
                        button {
                            style: if pagina_render.mostrar_siguiente {
                                "visibility: visible;"
                            } else {
                                "visibility: hidden;"
                            },
                            disabled: busy() || !pagina_render.mostrar_siguiente,
                            onclick: move |_| {
                                engine.write().next_page();
                            },
                            "Siguiente"
                        }
                    }
                }
            }
        }
    }
}
