use crate::analyzer::aggregate::value_counts;
use crate::parser::Ticket;

/// Static instruction preamble — role, output-format contract, rules and one
/// worked example. Not derived from data.
const PREAMBLE: &str = "\
Você é um analista técnico especializado em suporte de automação. Analise os dados fornecidos e crie um relatório
seguindo EXATAMENTE este formato para cada robô:

[Nome do Robô] ([X] Chamados)

[Categoria do Problema]
[Descrição explicativa do problema, incluindo a causa raiz identificada nos comentários]

Regras importantes:
1. Não use porcentagens ou estatísticas numéricas
2. Agrupe problemas similares em uma única categoria
3. Use os comentários realizados para explicar a causa real de cada problema
4. Mantenha um tom técnico e direto
5. Cada categoria deve ter uma explicação clara do problema e sua causa
6. Use as informações dos campos 'Motivo do contato' e 'Comentários do que foi realizado' para criar explicações precisas
7. Não crie seções de \"Conclusão\" ou \"Resumo\"

Exemplo do formato esperado:
DCTFWeb (27 Chamados)

Erro na importação de planilha
Problemas identificados durante o carregamento de arquivos para processamento em lote, causados principalmente por incompatibilidade de formato ou estrutura dos dados.

Instabilidade do sistema
Falhas na execução devido a problemas de conexão com os portais governamentais, resultando em interrupções no processamento automático.

Dados para análise:
";

/// Static closing reminder appended after the data section.
const CLOSING: &str = "
Crie o relatório seguindo EXATAMENTE o formato solicitado, usando as informações fornecidas para
criar categorias claras e explicações precisas baseadas nos motivos e comentários reais.
Não adicione informações estatísticas ou conclusões gerais.
";

/// System role text for the chat-completions call.
pub const SYSTEM_ROLE: &str = "Você é um analista técnico que deve criar relatórios precisos e \
diretos. Siga EXATAMENTE o formato solicitado, sem adicionar seções extras ou estatísticas.";

/// Synthesize the summarizer prompt from the filtered tickets.
///
/// Robots appear in descending ticket count (ties in first-encountered
/// order); inside a group every ticket contributes a "Motivo:" line when the
/// reason is present, a "Comentário:" line when the comment is present, and
/// always a "---" separator. The pattern-finding itself is delegated to the
/// summarizer — this function only guarantees a deterministic, reproducible
/// data section.
pub fn build_robot_analysis_prompt(filtered: &[Ticket]) -> String {
    let mut prompt = String::from(PREAMBLE);

    let robot_counts = value_counts(filtered.iter().map(|t| t.robo.as_str()));
    for entry in &robot_counts {
        prompt.push_str(&format!("\n{} ({} Chamados)\n", entry.label, entry.count));
        prompt.push_str("Motivos e Comentários:\n");

        for ticket in filtered.iter().filter(|t| t.robo == entry.label) {
            if let Some(motivo) = &ticket.motivo_contato {
                prompt.push_str(&format!("Motivo: {motivo}\n"));
            }
            if let Some(comentario) = &ticket.comentarios {
                prompt.push_str(&format!("Comentário: {comentario}\n"));
            }
            prompt.push_str("---\n");
        }
    }

    prompt.push_str(CLOSING);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::load_tickets_reader;

    const HDR: &str = concat!(
        "Nome do robô;Responsável;Contato;Motivo do contato;",
        "Comentários do que foi realizado;Criado;",
        "Data Encerramento (Automático);Prazo de Resolução"
    );

    fn tickets(rows: &[&str]) -> Vec<Ticket> {
        let csv = format!("{HDR}\n{}", rows.join("\n"));
        load_tickets_reader(csv.as_bytes()).unwrap().tickets
    }

    #[test]
    fn test_alpha_beta_ordering_and_optional_lines() {
        let ts = tickets(&[
            "Alpha;Ana;C;Erro X;;01/03/2025 08:00:00;;",
            "Beta;Ana;C;;;01/03/2025 08:00:00;;",
            "Alpha;Ana;C;Erro X;;02/03/2025 08:00:00;;",
            "Alpha;Ana;C;;Ajuste manual;03/03/2025 08:00:00;;",
        ]);
        let prompt = build_robot_analysis_prompt(&ts);

        let alpha = prompt.find("Alpha (3 Chamados)").expect("Alpha header");
        let beta = prompt.find("Beta (1 Chamados)").expect("Beta header");
        assert!(alpha < beta, "Alpha must come before Beta");

        // The Beta section has a blank reason — no Motivo line after its header.
        assert!(!prompt[beta..].contains("Motivo:"));

        assert!(prompt.contains("Motivo: Erro X\n"));
        assert!(prompt.contains("Comentário: Ajuste manual\n"));
    }

    #[test]
    fn test_ticket_without_reason_or_comment_is_separator_only() {
        let ts = tickets(&["Alpha;Ana;C;;;01/03/2025 08:00:00;;"]);
        let prompt = build_robot_analysis_prompt(&ts);
        let data = prompt
            .split("Motivos e Comentários:\n")
            .nth(1)
            .unwrap()
            .split('\n')
            .next()
            .unwrap();
        assert_eq!(data, "---");
        assert!(!prompt.contains("Motivo:"));
        assert!(!prompt.contains("Comentário:"));
    }

    #[test]
    fn test_robot_ties_keep_first_encountered_order() {
        let ts = tickets(&[
            "Gama;Ana;C;;;01/03/2025 08:00:00;;",
            "Delta;Ana;C;;;01/03/2025 08:00:00;;",
        ]);
        let prompt = build_robot_analysis_prompt(&ts);
        assert!(prompt.find("Gama (1 Chamados)").unwrap() < prompt.find("Delta (1 Chamados)").unwrap());
    }

    #[test]
    fn test_separator_per_ticket() {
        let ts = tickets(&[
            "Alpha;Ana;C;M1;C1;01/03/2025 08:00:00;;",
            "Alpha;Ana;C;M2;;01/03/2025 08:00:00;;",
        ]);
        let prompt = build_robot_analysis_prompt(&ts);
        assert_eq!(prompt.matches("---\n").count(), 2);
    }

    #[test]
    fn test_preamble_and_closing_present() {
        let prompt = build_robot_analysis_prompt(&[]);
        assert!(prompt.starts_with("Você é um analista técnico"));
        assert!(prompt.contains("Dados para análise:"));
        assert!(prompt.trim_end().ends_with("conclusões gerais."));
    }
}
