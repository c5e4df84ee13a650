//! Inspection profiles and their fixed checklist texts.
//!
//! Each profile selects the focus areas the model is told to inspect.
//! Checklists are static Brazilian-Portuguese text blocks embedded in the
//! prompt verbatim.

use serde::{Deserialize, Serialize};

/// Inspection domain for a vistoria
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InspectionProfile {
    /// Construction site
    Construction,
    /// Retail store
    Retail,
    /// Industrial plant
    IndustrialPlant,
}

impl Default for InspectionProfile {
    fn default() -> Self {
        Self::Construction
    }
}

impl std::fmt::Display for InspectionProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

const CONSTRUCTION_CHECKLIST: &str = "\
Foque sua vistoria em:
- Equipamentos de Protecao Individual (EPI): capacetes, coletes refletivos, luvas, oculos de seguranca, botinas
- Protecao contra quedas: seguranca de andaimes, guarda-corpos, redes de protecao, uso de cinto de seguranca
- Armazenamento de materiais: empilhamento adequado, armazenamento seguro, manuseio de materiais perigosos
- Maquinario e equipamentos: operacao correta, protecoes de seguranca, condicoes de manutencao
- Organizacao e limpeza: entulho, riscos de tropecos, passagens livres
- Seguranca em escavacoes: escoramento, taludes, acesso e saida
- Seguranca eletrica: fiacoes expostas, aterramento adequado, bloqueio e etiquetagem";

const RETAIL_CHECKLIST: &str = "\
Foque sua vistoria em:
- Conformidade com planograma: posicionamento de produtos, organizacao de prateleiras, frente de gondola
- Limpeza da loja: pisos, prateleiras, displays, banheiros
- Seguranca de corredores: passagens bloqueadas, riscos de tropecos, derramamentos
- Sinalizacao: precisao de precos, displays promocionais, placas de seguranca
- Organizacao de filas: fluxo de caixa, areas de espera
- Saidas de emergencia: caminhos livres, sinalizacao adequada, acessibilidade
- Estoque: excesso, falta, produtos danificados
- Experiencia do cliente: disponibilidade de funcionarios, qualidade do atendimento";

const INDUSTRIAL_CHECKLIST: &str = "\
Foque sua vistoria em:
- Bloqueio e Etiquetagem (LOTO): procedimentos adequados, isolamento de energia
- Protecao de maquinas: barreiras de seguranca, intertravamentos, paradas de emergencia
- Comportamento do operador: postura, uso de EPI, praticas seguras de trabalho
- Fluxo de materiais: seguranca de esteiras, operacoes de empilhadeira, carga/descarga
- Manuseio de produtos quimicos: armazenamento adequado, rotulagem, contencao de derramamentos
- Ventilacao: extracao de fumos, qualidade do ar
- Exposicao ao ruido: protecao auditiva, barreiras acusticas
- Ergonomia: configuracao de estacoes de trabalho, riscos de movimentos repetitivos";

impl InspectionProfile {
    /// All profiles in menu order
    pub const ALL: [InspectionProfile; 3] = [
        InspectionProfile::Construction,
        InspectionProfile::Retail,
        InspectionProfile::IndustrialPlant,
    ];

    /// Parse user input into a profile.
    ///
    /// Accepts the localized display names and common CLI spellings.
    /// Unrecognized input silently falls back to `Construction`; the
    /// tool always produces a usable prompt instead of rejecting the
    /// request.
    pub fn from_input(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "construcao" | "construction" | "obra" | "canteiro" => Self::Construction,
            "loja de varejo" | "varejo" | "retail" | "loja" => Self::Retail,
            "planta industrial" | "industrial" | "industrial-plant" | "industria" | "planta" => {
                Self::IndustrialPlant
            }
            _ => Self::Construction,
        }
    }

    /// Localized display name, also used in the prompt's role statement
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Construction => "Construcao",
            Self::Retail => "Loja de varejo",
            Self::IndustrialPlant => "Planta industrial",
        }
    }

    /// Fixed checklist text for this profile
    pub fn checklist(&self) -> &'static str {
        match self {
            Self::Construction => CONSTRUCTION_CHECKLIST,
            Self::Retail => RETAIL_CHECKLIST,
            Self::IndustrialPlant => INDUSTRIAL_CHECKLIST,
        }
    }
}
