use serde_json::Value;

use crate::domain::entities::row::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFormat {
    Text,
    Fixed(usize),
    Concat {
        second: &'static str,
        sep: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub header: &'static str,
    pub field: &'static str,
    pub format: CellFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub columns: Vec<ColumnSpec>,
}

impl ViewConfig {
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|column| column.header).collect()
    }

    pub fn render_row(&self, row: &Row) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| render_cell(row, column))
            .collect()
    }
}

fn render_cell(row: &Row, column: &ColumnSpec) -> String {
    match column.format {
        CellFormat::Text => row.display(column.field),
        // Los valores ya formateados por el servidor llegan como texto
        // y pasan tal cual; solo se redondean los numéricos.
        CellFormat::Fixed(decimales) => match row.get(column.field) {
            Some(Value::Number(number)) => match number.as_f64() {
                Some(value) => format!("{value:.decimales$}"),
                None => row.display(column.field),
            },
            _ => row.display(column.field),
        },
        CellFormat::Concat { second, sep } => {
            let primero = row.display(column.field);
            let segundo = row.display(second);
            if segundo.is_empty() {
                primero
            } else if primero.is_empty() {
                segundo
            } else {
                format!("{primero}{sep}{segundo}")
            }
        }
    }
}

pub fn puntos_view() -> ViewConfig {
    ViewConfig {
        columns: vec![
            ColumnSpec {
                header: "Nº",
                field: "n",
                format: CellFormat::Text,
            },
            ColumnSpec {
                header: "Fecha y hora",
                field: "fecha",
                format: CellFormat::Concat {
                    second: "hora",
                    sep: " ",
                },
            },
            ColumnSpec {
                header: "Longitud",
                field: "longitud",
                format: CellFormat::Fixed(9),
            },
            ColumnSpec {
                header: "Latitud",
                field: "latitud",
                format: CellFormat::Fixed(9),
            },
            ColumnSpec {
                header: "Distancia",
                field: "distancia",
                format: CellFormat::Fixed(3),
            },
            ColumnSpec {
                header: "Tiempo",
                field: "tiempo",
                format: CellFormat::Fixed(1),
            },
            ColumnSpec {
                header: "Velocidad",
                field: "velocidad",
                format: CellFormat::Text,
            },
        ],
    }
}

pub fn portales_view() -> ViewConfig {
    ViewConfig {
        columns: vec![
            ColumnSpec {
                header: "Dirección",
                field: "street",
                format: CellFormat::Concat {
                    second: "number",
                    sep: " ",
                },
            },
            ColumnSpec {
                header: "C.P.",
                field: "post_code",
                format: CellFormat::Text,
            },
            ColumnSpec {
                header: "PDA",
                field: "cod_pda",
                format: CellFormat::Text,
            },
            ColumnSpec {
                header: "Tiempo acumulado",
                field: "time_accumulated",
                format: CellFormat::Fixed(1),
            },
            ColumnSpec {
                header: "Tiempo medio",
                field: "time_mean",
                format: CellFormat::Fixed(1),
            },
            ColumnSpec {
                header: "Distancia al portal",
                field: "distance_portal",
                format: CellFormat::Fixed(3),
            },
            ColumnSpec {
                header: "Latitud",
                field: "latitud_portal",
                format: CellFormat::Fixed(9),
            },
            ColumnSpec {
                header: "Longitud",
                field: "longitud_portal",
                format: CellFormat::Fixed(9),
            },
            ColumnSpec {
                header: "Visitas",
                field: "times_visited",
                format: CellFormat::Text,
            },
            ColumnSpec {
                header: "Tipo",
                field: "type",
                format: CellFormat::Text,
            },
            ColumnSpec {
                header: "Parada",
                field: "is_stop",
                format: CellFormat::Text,
            },
        ],
    }
}
