use crate::domain::entities::row::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Menor,
    MenorIgual,
    Igual,
    NoIgual,
    Mayor,
    MayorIgual,
}

impl Comparator {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "menor" => Some(Comparator::Menor),
            "menor-igual" => Some(Comparator::MenorIgual),
            "igual" => Some(Comparator::Igual),
            "no-igual" => Some(Comparator::NoIgual),
            "mayor" => Some(Comparator::Mayor),
            "mayor-igual" => Some(Comparator::MayorIgual),
            _ => None,
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Comparator::Menor => "menor",
            Comparator::MenorIgual => "menor-igual",
            Comparator::Igual => "igual",
            Comparator::NoIgual => "no-igual",
            Comparator::Mayor => "mayor",
            Comparator::MayorIgual => "mayor-igual",
        }
    }

    pub fn holds(&self, value: f64, reference: f64) -> bool {
        match self {
            Comparator::Menor => value < reference,
            Comparator::MenorIgual => value <= reference,
            Comparator::Igual => value == reference,
            Comparator::NoIgual => value != reference,
            Comparator::Mayor => value > reference,
            Comparator::MayorIgual => value >= reference,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    pub field: String,
    pub comparator: Option<Comparator>,
    pub reference: String,
}

impl Criterion {
    // Solo la referencia en blanco deja el criterio inactivo. Una referencia
    // no numérica o un token de comparador desconocido nunca se cumplen.
    pub fn new(field: &str, token: &str, raw_reference: &str) -> Self {
        Self {
            field: field.to_string(),
            comparator: Comparator::from_token(token),
            reference: raw_reference.trim().to_string(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.reference.is_empty()
    }

    pub fn matches(&self, row: &Row) -> bool {
        if !self.is_active() {
            return true;
        }
        let Some(comparator) = self.comparator else {
            return false;
        };
        let Ok(reference) = self.reference.parse::<f64>() else {
            return false;
        };
        match row.numeric(&self.field) {
            Some(value) => comparator.holds(value, reference),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub criterios: Vec<Criterion>,
}

impl FilterCriteria {
    pub fn new(criterios: Vec<Criterion>) -> Self {
        Self { criterios }
    }

    pub fn has_active(&self) -> bool {
        self.criterios.iter().any(Criterion::is_active)
    }

    pub fn matches(&self, row: &Row) -> bool {
        self.criterios.iter().all(|criterio| criterio.matches(row))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterError {
    NoActiveFilter,
}

impl std::fmt::Display for FilterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterError::NoActiveFilter => write!(f, "no hay ningún filtro activo"),
        }
    }
}

impl std::error::Error for FilterError {}
