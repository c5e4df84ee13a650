//! Prompt construction for the vistoria model call.
//!
//! `build_inspection_prompt` is a pure function of the profile and the
//! optional user context. The JSON schema block is a single constant
//! shared by all profiles; its field names are the localized keys the
//! normalizer reads back.

use crate::profile::InspectionProfile;

/// Output schema embedded verbatim in every prompt.
///
/// Field names here must stay character-for-character identical to the
/// localized keys checked in `report::InspectionReport::from_value`.
pub const REPORT_JSON_SCHEMA: &str = r#"{
  "resumo": "Avaliacao geral breve da vistoria",
  "nivel_risco_geral": "BAIXO | MEDIO | ALTO | CRITICO",
  "problemas": [
    {
      "id": "identificador unico como PRB-001",
      "timestamp_inicio": "HH:MM:SS",
      "timestamp_fim": "HH:MM:SS",
      "categoria": "SEGURANCA | QUALIDADE | ORGANIZACAO | CONFORMIDADE | OUTRO",
      "titulo": "Titulo curto do problema",
      "descricao": "Descricao detalhada do problema",
      "severidade": "BAIXO | MEDIO | ALTO | CRITICO",
      "acao_recomendada": "O que deve ser feito para corrigir",
      "norma_ou_regra": "Regulamentacao ou norma relevante se aplicavel"
    }
  ],
  "proximas_acoes": [
    {
      "responsavel": "Supervisor | Gerente de Loja | Engenheiro de Seguranca | Outro",
      "acao": "Acao especifica a ser tomada",
      "prioridade": "BAIXA | MEDIA | ALTA",
      "prazo_em_dias": numero
    }
  ],
  "transcricao_completa": "Transcricao completa de toda fala e eventos relevantes observados"
}"#;

const INSTRUCTION_BLOCK: &str = "\
INSTRUCOES:
1. Assista ao video inteiro com atencao, anotando todos os timestamps onde ocorrem problemas
2. Transcreva toda fala relevante, conversas e narracoes
3. Identifique TODOS os riscos de seguranca, problemas de qualidade, violacoes de conformidade e areas de preocupacao
4. Classifique cada problema por severidade e forneca recomendacoes acionaveis
5. Avalie o nivel de risco geral com base nas descobertas cumulativas";

const CLOSING_BLOCK: &str = "\
IMPORTANTE:
- Seja minucioso - nao deixe passar nenhum problema visivel no video
- Forneca timestamps especificos para cada problema
- Inclua a transcricao completa em transcricao_completa
- Se nenhum problema for encontrado, retorne um array de problemas vazio com um resumo positivo
- Garanta que todo o JSON esteja formatado corretamente e valido
- RESPONDA SEMPRE EM PORTUGUES BRASILEIRO";

/// Build the full inspection prompt.
///
/// Empty or whitespace-only context is treated as absent: the context
/// section is omitted entirely, not left as an empty placeholder.
pub fn build_inspection_prompt(profile: InspectionProfile, extra_context: Option<&str>) -> String {
    let mut prompt = format!(
        "Voce e um assistente especialista em vistorias e auditorias especializado em ambientes de {}.\n\n\
         TAREFA: Analise este video minuciosamente e produza um relatorio de vistoria abrangente.\n\n\
         {}\n\n\
         {}",
        profile.display_name(),
        profile.checklist(),
        INSTRUCTION_BLOCK,
    );

    if let Some(context) = extra_context {
        let context = context.trim();
        if !context.is_empty() {
            prompt.push_str("\n\nCONTEXTO ADICIONAL DO USUARIO: ");
            prompt.push_str(context);
        }
    }

    prompt.push_str(&format!(
        "\n\n\
         FORMATO DE SAIDA:\n\
         Retorne sua resposta como JSON valido seguindo exatamente este esquema:\n\
         {}\n\n\
         {}",
        REPORT_JSON_SCHEMA, CLOSING_BLOCK,
    ));

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_own_checklist_only() {
        for profile in InspectionProfile::ALL {
            let prompt = build_inspection_prompt(profile, None);
            assert!(prompt.contains(profile.checklist()));
            for other in InspectionProfile::ALL {
                if other != profile {
                    assert!(!prompt.contains(other.checklist()));
                }
            }
        }
    }

    #[test]
    fn test_empty_context_is_treated_as_absent() {
        for profile in InspectionProfile::ALL {
            let without = build_inspection_prompt(profile, None);
            let empty = build_inspection_prompt(profile, Some(""));
            let blank = build_inspection_prompt(profile, Some("   \n"));
            assert_eq!(without, empty);
            assert_eq!(without, blank);
        }
    }

    #[test]
    fn test_context_block_is_the_only_difference() {
        let without = build_inspection_prompt(InspectionProfile::Construction, None);
        let with = build_inspection_prompt(InspectionProfile::Construction, Some("X"));
        assert!(with.contains("X"));
        assert_eq!(
            with.replace("\n\nCONTEXTO ADICIONAL DO USUARIO: X", ""),
            without
        );
    }

    #[test]
    fn test_schema_block_present_in_all_profiles() {
        for profile in InspectionProfile::ALL {
            let prompt = build_inspection_prompt(profile, None);
            assert!(prompt.contains(REPORT_JSON_SCHEMA));
        }
    }

    #[test]
    fn test_retail_prompt_with_context() {
        let prompt =
            build_inspection_prompt(InspectionProfile::Retail, Some("check the loading dock"));
        assert!(prompt.contains("planograma"));
        assert!(prompt.contains("check the loading dock"));
        assert!(prompt.ends_with("RESPONDA SEMPRE EM PORTUGUES BRASILEIRO"));
    }
}
