use crate::domain::entities::filter::{FilterCriteria, FilterError};
use crate::domain::entities::row::Row;
use crate::usecase::services::view_config::ViewConfig;
use crate::PAGE_SIZE;

pub const SIN_RESULTADOS: &str =
    "No se encontraron registros que coincidan con los filtros aplicados.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveSet {
    Resultados,
    Filtrados,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableViewEngine {
    resultados: Vec<Row>,
    filtrados: Option<Vec<Row>>,
    pagina: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub headers: Vec<&'static str>,
    pub filas: Vec<Vec<String>>,
    pub etiqueta: String,
    pub aviso: Option<String>,
    pub mostrar_paginador: bool,
    pub mostrar_anterior: bool,
    pub mostrar_siguiente: bool,
}

impl TableViewEngine {
    pub fn new() -> Self {
        Self {
            resultados: Vec::new(),
            filtrados: None,
            pagina: 1,
        }
    }

    // Cargar sustituye la tabla completa y descarta cualquier filtrado.
    pub fn load(&mut self, rows: Vec<Row>) {
        self.resultados = rows;
        self.filtrados = None;
        self.pagina = 1;
    }

    // Modo local: evalúa los criterios sobre la tabla cargada. Modo remoto:
    // el servidor ya filtró y sus filas mandan sobre la evaluación local.
    pub fn apply_filter(
        &mut self,
        criteria: &FilterCriteria,
        server_rows: Option<Vec<Row>>,
    ) -> Result<(), FilterError> {
        let filtrados = match server_rows {
            Some(rows) => rows,
            None => {
                if !criteria.has_active() {
                    return Err(FilterError::NoActiveFilter);
                }
                self.resultados
                    .iter()
                    .filter(|row| criteria.matches(row))
                    .cloned()
                    .collect()
            }
        };
        self.filtrados = Some(filtrados);
        self.pagina = 1;
        Ok(())
    }

    pub fn clear_filter(&mut self) {
        self.filtrados = None;
        self.pagina = 1;
    }

    pub fn selector(&self) -> ActiveSet {
        if self.filtrados.is_some() {
            ActiveSet::Filtrados
        } else {
            ActiveSet::Resultados
        }
    }

    fn active_rows(&self) -> &[Row] {
        match &self.filtrados {
            Some(filtrados) => filtrados,
            None => &self.resultados,
        }
    }

    pub fn page(&self) -> usize {
        self.pagina
    }

    pub fn total_pages(&self) -> usize {
        self.active_rows().len().div_ceil(PAGE_SIZE).max(1)
    }

    pub fn next_page(&mut self) {
        if self.pagina < self.total_pages() {
            self.pagina += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.pagina > 1 {
            self.pagina -= 1;
        }
    }

    pub fn render_page(&self, config: &ViewConfig) -> RenderedPage {
        let datos = self.active_rows();

        if datos.is_empty() && self.filtrados.is_some() {
            return RenderedPage {
                headers: config.headers(),
                filas: Vec::new(),
                etiqueta: "Página 0 de 0".to_string(),
                aviso: Some(SIN_RESULTADOS.to_string()),
                mostrar_paginador: false,
                mostrar_anterior: false,
                mostrar_siguiente: false,
            };
        }

        let total = self.total_pages();
        let inicio = (self.pagina - 1) * PAGE_SIZE;
        let fin = (inicio + PAGE_SIZE).min(datos.len());
        let inicio = inicio.min(fin);

        let filas = datos[inicio..fin]
            .iter()
            .map(|row| config.render_row(row))
            .collect();

        RenderedPage {
            headers: config.headers(),
            filas,
            etiqueta: format!("Página {} de {}", self.pagina, total),
            aviso: None,
            mostrar_paginador: true,
            mostrar_anterior: self.pagina > 1,
            mostrar_siguiente: self.pagina < total,
        }
    }
}
