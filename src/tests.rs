use serde_json::{json, Value};

use crate::domain::entities::filter::{Comparator, Criterion, FilterCriteria, FilterError};
use crate::domain::entities::row::{extract_numeric, extract_numeric_str, Row};
use crate::infra::http::client::{server_message, HttpApi};
use crate::platform::desktop::blocking::run_blocking;
use crate::usecase::ports::api::{
    AgrupacionPorTipo, ConsultaTabla, FiltradoResponse, FiltroPortales, FiltroRegistros,
    TablaResponse,
};
use crate::usecase::services::table_view::{ActiveSet, TableViewEngine, SIN_RESULTADOS};
use crate::usecase::services::view_config::{portales_view, puntos_view};
use crate::{valida_rango_fechas, PAGE_SIZE};

fn fila(value: Value) -> Row {
    match value {
        Value::Object(map) => Row(map),
        other => panic!("la fila de prueba debe ser un objeto JSON, no {other}"),
    }
}

fn filas_puntos(total: usize) -> Vec<Row> {
    (1..=total)
        .map(|n| {
            fila(json!({
                "n": n,
                "hora": "08:00:00",
                "fecha": "2024-05-06",
                "longitud": -3.703790123,
                "latitud": 40.416775456,
                "distancia": format!("{n}.500 m"),
                "tiempo": format!("{n} sec"),
                "velocidad": "12.5 km/h",
            }))
        })
        .collect()
}

fn criterio_distancia(token: &str, referencia: &str) -> FilterCriteria {
    FilterCriteria::new(vec![Criterion::new("distancia", token, referencia)])
}

#[test]
fn extraccion_numerica_toma_el_primer_tramo_de_digitos() {
    assert_eq!(extract_numeric_str("12.500 m"), Some(12.5));
    assert_eq!(extract_numeric_str("7 sec"), Some(7.0));
    assert_eq!(extract_numeric_str("aprox. 3.2 km/h"), Some(3.2));
    assert_eq!(extract_numeric_str("v=90km"), Some(90.0));
}

#[test]
fn extraccion_numerica_admite_un_solo_punto_decimal() {
    assert_eq!(extract_numeric_str("1.2.3"), Some(1.2));
    assert_eq!(extract_numeric_str("10..5"), Some(10.0));
}

#[test]
fn extraccion_numerica_sin_digitos_falla() {
    assert_eq!(extract_numeric_str("abc"), None);
    assert_eq!(extract_numeric_str(""), None);
    assert_eq!(extract_numeric_str("..."), None);
}

#[test]
fn extraccion_numerica_sobre_valores_json() {
    assert_eq!(extract_numeric(&json!(4.25)), Some(4.25));
    assert_eq!(extract_numeric(&json!("3.000 m")), Some(3.0));
    assert_eq!(extract_numeric(&json!(true)), None);
    assert_eq!(extract_numeric(&json!(null)), None);
}

#[test]
fn comparadores_cumplen_su_tabla() {
    assert!(Comparator::Menor.holds(1.0, 2.0));
    assert!(!Comparator::Menor.holds(2.0, 2.0));
    assert!(Comparator::MenorIgual.holds(2.0, 2.0));
    assert!(!Comparator::MenorIgual.holds(3.0, 2.0));
    assert!(Comparator::Igual.holds(2.0, 2.0));
    assert!(!Comparator::Igual.holds(2.1, 2.0));
    assert!(Comparator::NoIgual.holds(2.1, 2.0));
    assert!(!Comparator::NoIgual.holds(2.0, 2.0));
    assert!(Comparator::Mayor.holds(3.0, 2.0));
    assert!(!Comparator::Mayor.holds(2.0, 2.0));
    assert!(Comparator::MayorIgual.holds(2.0, 2.0));
    assert!(!Comparator::MayorIgual.holds(1.9, 2.0));
}

#[test]
fn tokens_de_comparador_ida_y_vuelta() {
    for token in [
        "menor",
        "menor-igual",
        "igual",
        "no-igual",
        "mayor",
        "mayor-igual",
    ] {
        let comparador =
            Comparator::from_token(token).expect("todos los tokens conocidos deben resolverse");
        assert_eq!(comparador.token(), token);
    }
    assert_eq!(Comparator::from_token("distinto"), None);
}

#[test]
fn criterio_en_blanco_queda_inactivo_y_deja_pasar_todo() {
    let criterio = Criterion::new("distancia", "menor", "   ");
    assert!(!criterio.is_active());
    assert!(criterio.matches(&fila(json!({ "distancia": "99 m" }))));
}

#[test]
fn referencia_no_numerica_es_activa_pero_nunca_coincide() {
    let criterio = Criterion::new("distancia", "menor", "mucho");
    assert!(criterio.is_active());
    assert!(!criterio.matches(&fila(json!({ "distancia": "3.000 m" }))));
}

#[test]
fn filtrar_con_referencia_no_numerica_excluye_todas_las_filas() {
    let mut engine = TableViewEngine::new();
    engine.load(filas_puntos(3));

    engine
        .apply_filter(&criterio_distancia("menor", "mucho"), None)
        .expect("una referencia no vacía cuenta como filtro activo");

    let render = engine.render_page(&puntos_view());
    assert!(render.filas.is_empty());
    assert_eq!(render.aviso.as_deref(), Some(SIN_RESULTADOS));
}

#[test]
fn comparador_desconocido_nunca_se_cumple() {
    let criterio = Criterion::new("distancia", "parecido", "5");
    assert!(criterio.is_active());
    assert!(!criterio.matches(&fila(json!({ "distancia": "3.000 m" }))));
}

#[test]
fn criterio_activo_descarta_celdas_sin_numero() {
    let criterio = Criterion::new("distancia", "menor", "5");
    assert!(!criterio.matches(&fila(json!({ "distancia": "abc" }))));
    assert!(!criterio.matches(&fila(json!({ "tiempo": "3 sec" }))));
}

#[test]
fn cargar_muestra_las_filas_en_orden() {
    let mut engine = TableViewEngine::new();
    engine.load(filas_puntos(3));

    let render = engine.render_page(&puntos_view());
    assert_eq!(render.filas.len(), 3);
    assert_eq!(render.filas[0][0], "1");
    assert_eq!(render.filas[2][0], "3");
    assert_eq!(render.etiqueta, "Página 1 de 1");
}

#[test]
fn total_de_paginas_nunca_baja_de_uno() {
    let mut engine = TableViewEngine::new();
    assert_eq!(engine.total_pages(), 1);

    engine.load(filas_puntos(1));
    assert_eq!(engine.total_pages(), 1);

    engine.load(filas_puntos(PAGE_SIZE));
    assert_eq!(engine.total_pages(), 1);

    engine.load(filas_puntos(PAGE_SIZE + 1));
    assert_eq!(engine.total_pages(), 2);
}

#[test]
fn paginacion_se_mantiene_dentro_de_los_limites() {
    let mut engine = TableViewEngine::new();
    engine.load(filas_puntos(120));
    assert_eq!(engine.total_pages(), 3);

    engine.prev_page();
    assert_eq!(engine.page(), 1, "retroceder en la primera página no hace nada");

    engine.next_page();
    engine.next_page();
    assert_eq!(engine.page(), 3);

    engine.next_page();
    assert_eq!(engine.page(), 3, "avanzar en la última página no hace nada");
}

#[test]
fn la_pagina_intermedia_corta_el_tramo_correcto() {
    let mut engine = TableViewEngine::new();
    engine.load(filas_puntos(120));
    engine.next_page();

    let render = engine.render_page(&puntos_view());
    assert_eq!(render.filas.len(), PAGE_SIZE);
    assert_eq!(render.filas[0][0], "51");
    assert_eq!(render.etiqueta, "Página 2 de 3");
    assert!(render.mostrar_paginador);
    assert!(render.mostrar_anterior);
    assert!(render.mostrar_siguiente);
}

#[test]
fn con_una_sola_pagina_se_ocultan_ambos_botones() {
    let mut engine = TableViewEngine::new();
    engine.load(filas_puntos(10));

    let render = engine.render_page(&puntos_view());
    assert!(render.mostrar_paginador);
    assert!(!render.mostrar_anterior);
    assert!(!render.mostrar_siguiente);
}

#[test]
fn en_la_ultima_pagina_solo_se_ve_anterior() {
    let mut engine = TableViewEngine::new();
    engine.load(filas_puntos(120));
    engine.next_page();
    engine.next_page();

    let render = engine.render_page(&puntos_view());
    assert_eq!(render.filas.len(), 20);
    assert!(render.mostrar_anterior);
    assert!(!render.mostrar_siguiente);
}

#[test]
fn filtrar_en_local_evalua_los_criterios() {
    let mut engine = TableViewEngine::new();
    engine.load(vec![
        fila(json!({ "n": 1, "distancia": "3.200 m" })),
        fila(json!({ "n": 2, "distancia": "7.000 m" })),
        fila(json!({ "n": 3, "distancia": "abc" })),
    ]);

    engine
        .apply_filter(&criterio_distancia("menor", "5"), None)
        .expect("un criterio activo debe aplicarse");

    assert_eq!(engine.selector(), ActiveSet::Filtrados);
    let render = engine.render_page(&puntos_view());
    assert_eq!(render.filas.len(), 1);
    assert_eq!(render.filas[0][0], "1");
}

#[test]
fn filtrar_sin_criterios_activos_no_cambia_nada() {
    let mut engine = TableViewEngine::new();
    engine.load(filas_puntos(60));
    engine.next_page();
    let antes = engine.clone();

    let resultado = engine.apply_filter(&criterio_distancia("menor", ""), None);
    assert_eq!(resultado, Err(FilterError::NoActiveFilter));
    assert_eq!(engine, antes, "el estado debe quedar intacto tras el rechazo");
}

#[test]
fn las_filas_del_servidor_mandan_sobre_la_evaluacion_local() {
    let mut engine = TableViewEngine::new();
    engine.load(filas_puntos(3));

    let del_servidor = vec![fila(json!({ "n": 42, "distancia": "1.000 m" }))];
    engine
        .apply_filter(&criterio_distancia("mayor", "100"), Some(del_servidor))
        .expect("con filas del servidor el filtrado siempre se aplica");

    let render = engine.render_page(&puntos_view());
    assert_eq!(render.filas.len(), 1);
    assert_eq!(render.filas[0][0], "42");
}

#[test]
fn filtrado_sin_coincidencias_muestra_el_aviso() {
    let mut engine = TableViewEngine::new();
    engine.load(filas_puntos(3));
    engine
        .apply_filter(&criterio_distancia("mayor", "1000"), None)
        .expect("el criterio es activo aunque no coincida nada");

    let render = engine.render_page(&puntos_view());
    assert!(render.filas.is_empty());
    assert_eq!(render.aviso.as_deref(), Some(SIN_RESULTADOS));
    assert_eq!(render.etiqueta, "Página 0 de 0");
    assert!(!render.mostrar_paginador);
}

#[test]
fn una_tabla_vacia_sin_filtro_no_es_un_aviso() {
    let engine = TableViewEngine::new();
    let render = engine.render_page(&puntos_view());
    assert_eq!(render.aviso, None);
    assert_eq!(render.etiqueta, "Página 1 de 1");
}

#[test]
fn limpiar_el_filtro_vuelve_a_la_tabla_original() {
    let mut engine = TableViewEngine::new();
    engine.load(filas_puntos(60));
    let original = engine.render_page(&puntos_view());

    engine
        .apply_filter(&criterio_distancia("menor", "5"), None)
        .expect("un criterio activo debe aplicarse");
    engine.clear_filter();

    assert_eq!(engine.selector(), ActiveSet::Resultados);
    assert_eq!(engine.page(), 1);
    assert_eq!(engine.render_page(&puntos_view()), original);
}

#[test]
fn una_nueva_carga_descarta_el_filtrado_anterior() {
    let mut engine = TableViewEngine::new();
    engine.load(filas_puntos(3));
    engine
        .apply_filter(&criterio_distancia("menor", "2"), None)
        .expect("un criterio activo debe aplicarse");

    engine.load(filas_puntos(5));
    assert_eq!(engine.selector(), ActiveSet::Resultados);
    assert_eq!(engine.page(), 1);
    assert_eq!(engine.render_page(&puntos_view()).filas.len(), 5);
}

#[test]
fn la_vista_de_puntos_concatena_fecha_y_hora() {
    let render = puntos_view().render_row(&fila(json!({
        "n": 1,
        "fecha": "2024-05-06",
        "hora": "08:15:00",
    })));
    assert_eq!(render[1], "2024-05-06 08:15:00");
}

#[test]
fn la_concatenacion_omite_el_separador_si_falta_una_parte() {
    let config = puntos_view();
    let solo_fecha = config.render_row(&fila(json!({ "fecha": "2024-05-06" })));
    assert_eq!(solo_fecha[1], "2024-05-06");

    let solo_hora = config.render_row(&fila(json!({ "hora": "08:15:00" })));
    assert_eq!(solo_hora[1], "08:15:00");
}

#[test]
fn los_numericos_se_redondean_y_el_texto_pasa_tal_cual() {
    let render = puntos_view().render_row(&fila(json!({
        "longitud": -3.7037901,
        "latitud": 40.4167754,
        "distancia": 12.5,
        "tiempo": "7 sec",
        "velocidad": "12.5 km/h",
    })));
    assert_eq!(render[2], "-3.703790100");
    assert_eq!(render[3], "40.416775400");
    assert_eq!(render[4], "12.500");
    assert_eq!(render[5], "7 sec");
    assert_eq!(render[6], "12.5 km/h");
}

#[test]
fn los_nulos_y_ausentes_se_muestran_vacios() {
    let render = puntos_view().render_row(&fila(json!({ "n": 1, "hora": null })));
    assert_eq!(render[1], "", "fecha ausente y hora nula");
    assert_eq!(render[6], "", "velocidad ausente");
}

#[test]
fn la_vista_de_portales_compone_direccion_y_listas() {
    let config = portales_view();
    assert_eq!(config.headers()[0], "Dirección");
    assert_eq!(config.headers().len(), 11);

    let render = config.render_row(&fila(json!({
        "street": "Gran Vía",
        "number": "12",
        "post_code": "28013",
        "cod_pda": ["PDA1", "PDA2"],
        "time_accumulated": 42.0,
        "times_visited": 3,
        "is_stop": true,
    })));
    assert_eq!(render[0], "Gran Vía 12");
    assert_eq!(render[2], "PDA1, PDA2");
    assert_eq!(render[3], "42.0");
    assert_eq!(render[10], "Sí");
}

#[test]
fn los_encabezados_de_puntos_siguen_el_orden_de_la_tabla() {
    assert_eq!(
        puntos_view().headers(),
        vec![
            "Nº",
            "Fecha y hora",
            "Longitud",
            "Latitud",
            "Distancia",
            "Tiempo",
            "Velocidad",
        ]
    );
}

#[test]
fn la_respuesta_de_tabla_se_decodifica_con_resumen() {
    let body = r#"{
        "resumen": {
            "puntos_totales": 2,
            "distancia_total": "1.2 km",
            "tiempo_total": "00:10:00",
            "velocidad_media": "7.2 km/h"
        },
        "tabla": [
            { "n": 1, "distancia": "3.200 m" },
            { "n": 2, "distancia": "7.000 m" }
        ]
    }"#;

    let respuesta: TablaResponse =
        serde_json::from_str(body).expect("el cuerpo de ejemplo debe decodificarse");
    assert_eq!(respuesta.resumen.puntos_totales, 2);
    assert_eq!(respuesta.resumen.distancia_total, "1.2 km");
    assert_eq!(respuesta.tabla.len(), 2);
    assert_eq!(respuesta.tabla[0].display("distancia"), "3.200 m");
}

#[test]
fn la_respuesta_de_filtrado_tolera_campos_ausentes() {
    let respuesta: FiltradoResponse =
        serde_json::from_str("{}").expect("un objeto vacío debe decodificarse");
    assert!(respuesta.tabla.is_empty());
    assert_eq!(respuesta.url, None);
    assert!(respuesta.warnings.is_empty());
}

#[test]
fn el_cuerpo_de_filtrado_usa_los_nombres_del_servidor() {
    let filtro = FiltroRegistros {
        distancia: "5".to_string(),
        signo_distancia: "menor".to_string(),
        tiempo: String::new(),
        signo_tiempo: "menor".to_string(),
        velocidad: String::new(),
        signo_velocidad: "menor".to_string(),
    };

    let body = serde_json::to_value(&filtro).expect("el filtro debe serializarse");
    assert_eq!(body["signoDistancia"], "menor");
    assert_eq!(body["signoTiempo"], "menor");
    assert_eq!(body["signoVelocidad"], "menor");
    assert_eq!(body["distancia"], "5");
}

#[test]
fn la_consulta_omite_la_fecha_de_fin_cuando_no_hay() {
    let consulta = ConsultaTabla {
        cod: "28001".to_string(),
        pda: "PDA1".to_string(),
        ini: "2024-05-06".to_string(),
        fin: None,
    };
    let body = serde_json::to_value(&consulta).expect("la consulta debe serializarse");
    assert!(body.get("fin").is_none());

    let con_fin = ConsultaTabla {
        fin: Some("2024-05-07".to_string()),
        ..consulta
    };
    let body = serde_json::to_value(&con_fin).expect("la consulta debe serializarse");
    assert_eq!(body["fin"], "2024-05-07");
}

#[test]
fn el_rango_de_fechas_se_valida_en_orden() {
    assert_eq!(valida_rango_fechas("2024-05-06", ""), Ok(()));
    assert_eq!(valida_rango_fechas("2024-05-06", "2024-05-06"), Ok(()));
    assert_eq!(valida_rango_fechas("2024-05-06", "2024-05-10"), Ok(()));
    assert!(valida_rango_fechas("2024-05-06", "2024-05-01").is_err());
    assert!(valida_rango_fechas("", "2024-05-06").is_err());
    assert!(valida_rango_fechas("06/05/2024", "").is_err());
}

#[test]
fn las_rutas_se_componen_sin_barras_duplicadas() {
    let api = HttpApi::new("http://127.0.0.1:5000/").expect("el cliente debe construirse");
    assert_eq!(
        api.url_for("/filtrar_registros"),
        "http://127.0.0.1:5000/filtrar_registros"
    );
    assert_eq!(
        api.url_for("generar_mapa/datos_tabla"),
        "http://127.0.0.1:5000/generar_mapa/datos_tabla"
    );
}

#[test]
fn el_cuerpo_de_filtrado_de_portales_usa_los_nombres_del_servidor() {
    let filtro = FiltroPortales {
        cod: "28001".to_string(),
        pda: "PDA1".to_string(),
        signo_pda: "no-igual".to_string(),
        diametro: "30".to_string(),
        num_pts: "4".to_string(),
        max_time: "600".to_string(),
        max_time_clus: "600".to_string(),
        time_acc: "120".to_string(),
        signo_time_acc: "mayor".to_string(),
        time_mean: String::new(),
        signo_time_mean: "menor".to_string(),
    };

    let body = serde_json::to_value(&filtro).expect("el filtro de portales debe serializarse");
    assert_eq!(body["signoPDA"], "no-igual");
    assert_eq!(body["numPts"], "4");
    assert_eq!(body["maxTime"], "600");
    assert_eq!(body["maxTimeClus"], "600");
    assert_eq!(body["timeAcc"], "120");
    assert_eq!(body["signoTimeAcc"], "mayor");
    assert_eq!(body["timeMean"], "");
    assert_eq!(body["signoTimeMean"], "menor");
}

#[test]
fn el_filtro_de_portales_exige_al_menos_un_campo() {
    let vacio = FiltroPortales {
        cod: "28001".to_string(),
        signo_pda: "igual".to_string(),
        signo_time_acc: "menor".to_string(),
        signo_time_mean: "menor".to_string(),
        ..FiltroPortales::default()
    };
    assert!(!vacio.tiene_algun_filtro());

    let con_pda = FiltroPortales {
        pda: "PDA1".to_string(),
        ..vacio.clone()
    };
    assert!(con_pda.tiene_algun_filtro());

    let con_diametro = FiltroPortales {
        diametro: "25".to_string(),
        ..vacio
    };
    assert!(con_diametro.tiene_algun_filtro());
}

#[test]
fn los_portales_se_filtran_por_tiempo_acumulado() {
    let mut engine = TableViewEngine::new();
    engine.load(vec![
        fila(json!({ "street": "Mayor", "number": "1", "time_accumulated": 30.0 })),
        fila(json!({ "street": "Sol", "number": "2", "time_accumulated": 180.0 })),
    ]);

    let criteria = FilterCriteria::new(vec![Criterion::new("time_accumulated", "mayor", "60")]);
    engine
        .apply_filter(&criteria, None)
        .expect("un criterio activo debe aplicarse");

    let render = engine.render_page(&portales_view());
    assert_eq!(render.filas.len(), 1);
    assert_eq!(render.filas[0][0], "Sol 2");
}

#[test]
fn la_agrupacion_por_tipo_envia_algoritmo_y_unidad() {
    let peticion = AgrupacionPorTipo {
        agrupamiento: "diametro".to_string(),
        cod: "28001".to_string(),
    };
    let body = serde_json::to_value(&peticion).expect("la petición debe serializarse");
    assert_eq!(body["agrupamiento"], "diametro");
    assert_eq!(body["cod"], "28001");
}

#[test]
fn los_warnings_del_servidor_se_convierten_en_aviso() {
    let respuesta: FiltradoResponse = serde_json::from_str(
        r#"{"tabla": [], "warnings": ["No hay datos cargados para filtrar."]}"#,
    )
    .expect("el cuerpo de ejemplo debe decodificarse");
    assert_eq!(
        respuesta.aviso().as_deref(),
        Some("No hay datos cargados para filtrar.")
    );

    let sin_warnings = FiltradoResponse::default();
    assert_eq!(sin_warnings.aviso(), None);
}

#[test]
fn el_trabajo_bloqueante_sale_del_hilo_que_espera() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("el runtime de pruebas debe construirse");

    let hilo_llamante = std::thread::current().id();
    let (valor, hilo_trabajo) =
        runtime.block_on(run_blocking(move || (7, std::thread::current().id())));

    assert_eq!(valor, 7);
    assert_ne!(
        hilo_trabajo, hilo_llamante,
        "la llamada bloqueante no debe ejecutarse en el hilo que la espera"
    );
}

#[test]
fn el_mensaje_del_servidor_sale_del_campo_error() {
    assert_eq!(
        server_message(r#"{"error": "PDA desconocida"}"#),
        "PDA desconocida"
    );
    assert_eq!(
        server_message("<html>500</html>"),
        "Ocurrió un error al procesar la solicitud."
    );
    assert_eq!(
        server_message(r#"{"detalle": "otro"}"#),
        "Ocurrió un error al procesar la solicitud."
    );
}
