use dioxus::prelude::{use_signal, Signal};

use crate::domain::entities::row::Resumen;
use crate::usecase::services::table_view::TableViewEngine;

pub struct AppState {
    pub codired: Signal<String>,
    pub pda: Signal<String>,
    pub pdas_disponibles: Signal<Vec<String>>,
    pub fechas_disponibles: Signal<Vec<String>>,
    pub fecha_inicio: Signal<String>,
    pub fecha_fin: Signal<String>,
    pub aviso_fecha: Signal<bool>,
    pub engine: Signal<TableViewEngine>,
    pub vista_portales: Signal<bool>,
    pub resumen: Signal<Option<Resumen>>,
    pub titulo: Signal<String>,
    pub mapa_url: Signal<Option<String>>,
    pub filtro_distancia: Signal<String>,
    pub signo_distancia: Signal<String>,
    pub filtro_tiempo: Signal<String>,
    pub signo_tiempo: Signal<String>,
    pub filtro_velocidad: Signal<String>,
    pub signo_velocidad: Signal<String>,
    pub filtro_pda: Signal<String>,
    pub signo_pda: Signal<String>,
    pub filtro_diametro: Signal<String>,
    pub filtro_num_pts: Signal<String>,
    pub filtro_max_time: Signal<String>,
    pub filtro_time_acc: Signal<String>,
    pub signo_time_acc: Signal<String>,
    pub filtro_time_mean: Signal<String>,
    pub signo_time_mean: Signal<String>,
    pub agrupamiento: Signal<String>,
    pub mostrar_tabla: Signal<bool>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            codired: use_signal(String::new),
            pda: use_signal(String::new),
            pdas_disponibles: use_signal(Vec::<String>::new),
            fechas_disponibles: use_signal(Vec::<String>::new),
            fecha_inicio: use_signal(String::new),
            fecha_fin: use_signal(String::new),
            aviso_fecha: use_signal(|| false),
            engine: use_signal(TableViewEngine::new),
            vista_portales: use_signal(|| false),
            resumen: use_signal(|| None::<Resumen>),
            titulo: use_signal(String::new),
            mapa_url: use_signal(|| None::<String>),
            filtro_distancia: use_signal(String::new),
            signo_distancia: use_signal(|| "menor".to_string()),
            filtro_tiempo: use_signal(String::new),
            signo_tiempo: use_signal(|| "menor".to_string()),
            filtro_velocidad: use_signal(String::new),
            signo_velocidad: use_signal(|| "menor".to_string()),
            filtro_pda: use_signal(String::new),
            signo_pda: use_signal(|| "igual".to_string()),
            filtro_diametro: use_signal(String::new),
            filtro_num_pts: use_signal(String::new),
            filtro_max_time: use_signal(String::new),
            filtro_time_acc: use_signal(String::new),
            signo_time_acc: use_signal(|| "menor".to_string()),
            filtro_time_mean: use_signal(String::new),
            signo_time_mean: use_signal(|| "menor".to_string()),
            agrupamiento: use_signal(|| "tiempo".to_string()),
            mostrar_tabla: use_signal(|| false),
            busy: use_signal(|| false),
            status: use_signal(|| "Listo".to_string()),
        }
    }
}
