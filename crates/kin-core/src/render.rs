//! Renderizado de los archivos de entrada de CanTherm.
//!
//! Funciones puras: misma entrada, mismos bytes. Los mapas de conteo son
//! `BTreeMap`, de modo que el orden de las entradas es estable entre
//! corridas.
use indexmap::IndexMap;
use kin_domain::SpeciesId;

use crate::classify::Classification;
use crate::constants::{HEADER, LOG_EXT, OPTICAL_ISOMERS, TS_LABEL, TUNNELING_MODEL};

/// Literal de cadena Python entre comillas simples.
fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn dict<'a>(name: &str, entries: impl Iterator<Item = (&'a str, usize)>, out: &mut Vec<String>) {
    let body: Vec<String> = entries.map(|(k, v)| format!("    {}: {},", quote(k), v)).collect();
    if body.is_empty() {
        out.push(format!("{name} = {{}}"));
    } else {
        out.push(format!("{name} = {{"));
        out.extend(body);
        out.push("}".to_string());
    }
}

/// Datos de un archivo de mecánica estadística (especie o estado de
/// transición). `log_stem` es el identificador de especie o la etiqueta de
/// la reacción.
#[derive(Debug, Clone)]
pub struct StatMechDocument<'a> {
    pub classification: &'a Classification,
    pub external_symmetry: u32,
    pub spin_multiplicity: u32,
    pub model_chemistry: &'a str,
    pub log_stem: &'a str,
}

impl StatMechDocument<'_> {
    pub fn render(&self) -> String {
        let mut out: Vec<String> = HEADER.iter().map(|s| s.to_string()).collect();
        out.push(String::new());
        dict("atoms",
             self.classification.atoms.iter().map(|(e, n)| (e.symbol(), *n)),
             &mut out);
        out.push(String::new());
        dict("bonds",
             self.classification.bonds.iter().map(|(k, n)| (k.as_str(), *n)),
             &mut out);

        let log = quote(&format!("{}.{}", self.log_stem, LOG_EXT));
        out.extend([String::new(),
                    "linear = False".to_string(),
                    String::new(),
                    format!("externalSymmetry = {}", self.external_symmetry),
                    String::new(),
                    format!("spinMultiplicity = {}", self.spin_multiplicity),
                    String::new(),
                    format!("opticalIsomers = {OPTICAL_ISOMERS}"),
                    String::new(),
                    "energy = {".to_string(),
                    format!("    {}: GaussianLog({log}),", quote(self.model_chemistry)),
                    "}".to_string(),
                    String::new(),
                    format!("geometry = GaussianLog({log})"),
                    String::new(),
                    format!("frequencies = GaussianLog({log})"),
                    String::new(),
                    "rotors = []".to_string()]);
        out.join("\n") + "\n"
    }
}

/// Declaración `species(<label>, <archivo>)` del descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesDeclaration {
    /// Etiqueta del lado del motor: el SMILES de la especie.
    pub label: String,
    pub file: String,
}

/// Descriptor de job de nivel superior.
#[derive(Debug, Clone)]
pub struct JobDescriptor {
    pub model_chemistry: String,
    pub freq_scale_factor: f64,
    /// Una entrada por identificador distinto, en orden de primera aparición.
    pub species: IndexMap<SpeciesId, SpeciesDeclaration>,
    pub transition_state_file: String,
    pub reaction_label: String,
    pub reactants: [String; 2],
    pub products: [String; 2],
}

impl JobDescriptor {
    /// Registra una especie; si el identificador ya estaba, gana la primera.
    pub fn declare_species(&mut self, id: SpeciesId, declaration: SpeciesDeclaration) -> bool {
        if self.species.contains_key(&id) {
            return false;
        }
        self.species.insert(id, declaration);
        true
    }

    pub fn render(&self) -> String {
        let mut out: Vec<String> = HEADER.iter().map(|s| s.to_string()).collect();
        out.extend([String::new(),
                    format!("modelChemistry = \"{}\"", self.model_chemistry.replace('"', "\\\"")),
                    format!("frequencyScaleFactor = {:?}", self.freq_scale_factor),
                    "useHinderedRotors = False".to_string(),
                    "useBondCorrections = False".to_string(),
                    String::new()]);
        for decl in self.species.values() {
            out.push(format!("species({}, {})", quote(&decl.label), quote(&decl.file)));
        }
        out.push(format!("transitionState({}, {})",
                         quote(TS_LABEL),
                         quote(&self.transition_state_file)));
        let pair = |items: &[String; 2]| format!("[{}, {}]", quote(&items[0]), quote(&items[1]));
        out.extend([String::new(),
                    "reaction(".to_string(),
                    format!("    label = {},", quote(&self.reaction_label)),
                    format!("    reactants = {},", pair(&self.reactants)),
                    format!("    products = {},", pair(&self.products)),
                    format!("    transitionState = {},", quote(TS_LABEL)),
                    format!("    tunneling = {},", quote(TUNNELING_MODEL)),
                    ")".to_string(),
                    String::new(),
                    format!("statmech({})", quote(TS_LABEL)),
                    format!("kinetics({})", quote(&self.reaction_label))]);
        out.join("\n") + "\n"
    }
}
