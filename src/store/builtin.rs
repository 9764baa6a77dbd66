use anyhow::Result;

use crate::domain::email::{Email, EmailId, Event};
use crate::store::repo::{Seed, SeedProvider};

/// Sample inbox bundled with the binary.
pub struct BuiltinSeed;

impl SeedProvider for BuiltinSeed {
    fn load(&self) -> Result<Seed> {
        Ok(Seed {
            emails: sample_emails(),
            events: sample_events(),
        })
    }

    fn describe(&self) -> String {
        "built-in sample inbox".to_string()
    }
}

fn event(
    id: u64,
    email_id: EmailId,
    title: &str,
    date: &str,
    start_time: &str,
    end_time: &str,
    link: &str,
) -> Event {
    Event {
        id,
        email_id,
        title: title.into(),
        date: date.into(),
        start_time: start_time.into(),
        end_time: end_time.into(),
        link: link.into(),
    }
}

fn sample_events() -> Vec<Event> {
    vec![
        event(
            1,
            2,
            "Reunião amanhã 10h",
            "17/06/2024",
            "10:00",
            "11:00",
            "https://meet.google.com/abc-def-ghi",
        ),
        event(2, 6, "Pagamento aluguel", "30/06/2024", "06:00", "23:59", ""),
    ]
}

#[allow(clippy::too_many_arguments)]
fn email(
    id: EmailId,
    sender: &str,
    subject: &str,
    preview: &str,
    content: &[&str],
    has_event: bool,
    is_starred: bool,
    image_res: &str,
) -> Email {
    Email {
        id,
        sender: sender.into(),
        subject: subject.into(),
        preview: preview.into(),
        content: content.join("\n"),
        has_event,
        is_starred,
        image_res: image_res.into(),
    }
}

fn sample_emails() -> Vec<Email> {
    vec![
        email(
            1,
            "José Manuel López",
            "Confira o relatório de seus investimentos",
            "Relatório detalhado dos seus investimentos.",
            &[
                "Olá,",
                "",
                "Em anexo, você encontrará o relatório detalhado dos seus investimentos no último trimestre. Qualquer dúvida, estou à disposição.",
                "",
                "Atenciosamente,",
                "José",
            ],
            false,
            true,
            "ic_person1",
        ),
        email(
            2,
            "Eduardo Pereira",
            "Confirmação de Reunião",
            "Por favor, confirme sua presença na reunião de amanhã.",
            &[
                "Olá,",
                "",
                "Gostaria de confirmar sua presença na reunião agendada para amanhã às 10h. Por favor, responda este e-mail confirmando sua participação.",
                "",
                "Obrigado,",
                "Eduardo",
            ],
            true,
            false,
            "ic_person2",
        ),
        email(
            3,
            "Luan Garcia",
            "Email sem assunto",
            "Mensagem sem assunto.",
            &[
                "Olá,",
                "",
                "Espero que esteja bem. Gostaria de discutir [assunto específico] com você. Quando seria um bom momento para conversarmos?",
                "",
                "Atenciosamente,",
                "Luan",
            ],
            false,
            false,
            "ic_person3",
        ),
        email(
            4,
            "Estevão William",
            "Novas Ofertas no Super Mercado Atacad...",
            "Confira as novas ofertas disponíveis nesta semana.",
            &[
                "Olá,",
                "",
                "Não perca as novas ofertas que acabamos de lançar! Confira em nosso site e aproveite os descontos exclusivos desta semana.",
                "",
                "Abraços,",
                "Estevão",
            ],
            false,
            false,
            "ic_person4",
        ),
        email(
            5,
            "Murilo Cerqueira",
            "Tudo bem com você?",
            "Queria saber como você está.",
            &[
                "Oi,",
                "",
                "Faz tempo que não conversamos. Queria saber como você está e o que tem feito ultimamente. Vamos marcar um café qualquer dia desses?",
                "",
                "Abraços,",
                "Murilo",
            ],
            false,
            false,
            "ic_person5",
        ),
        email(
            6,
            "Marcos Rocha",
            "Pagamento de Aluguel de Residencia",
            "Lembrete de pagamento do aluguel deste mês.",
            &[
                "Olá,",
                "",
                "Este é um lembrete amigável para o pagamento do aluguel deste mês. Por favor, efetue o pagamento até o dia 30/06/2024.",
                "",
                "Obrigado,",
                "Marcos",
            ],
            true,
            false,
            "ic_person6",
        ),
        email(
            7,
            "José Rafael",
            "Sua Assinatura do Cartão Exclusivo foi...",
            "Parabéns! Sua assinatura foi aprovada.",
            &[
                "Olá,",
                "",
                "Parabéns! Sua assinatura foi aprovada com sucesso. Você agora tem acesso completo aos nossos serviços. Qualquer dúvida, estamos à disposição.",
                "",
                "Atenciosamente,",
                "Rafael",
            ],
            false,
            false,
            "ic_person7",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sample_ids_are_unique_and_ordered() {
        let seed = BuiltinSeed.load().unwrap();
        let ids: Vec<_> = seed.emails.iter().map(|e| e.id).collect();
        assert_eq!(ids, (1..=7).collect::<Vec<_>>());
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn every_flagged_email_has_an_event() {
        let store = BuiltinSeed.load().unwrap().into_store();
        for e in store.all().iter().filter(|e| e.has_event) {
            assert!(store.event_for(e.id).is_some(), "email {} lacks event", e.id);
        }
        assert_eq!(store.favorites().len(), 1);
    }
}
