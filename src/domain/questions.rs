//! The fixed questionnaire: question texts, option labels, and stable
//! option codes.
//!
//! The question sequence is immutable at runtime. Option codes are the wire
//! identifiers carried in button callbacks; labels are what the user sees
//! and what the catalog combination key is built from.

/// One question with its ordered answer options.
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub text: &'static str,
    /// Ordered `(label, code)` pairs.
    pub options: &'static [(&'static str, &'static str)],
}

/// Number of questions in the sequence.
pub const QUESTION_COUNT: usize = 6;

/// The question sequence, in presentation order.
pub static QUESTIONS: [Question; QUESTION_COUNT] = [
    Question {
        text: "Какой напиток Вы предпочтёте?",
        options: &[("Фраппучино", "frap"), ("Зелёный чай", "tea"), ("Ром", "rum")],
    },
    Question {
        text: "Кто вы: интроверт или экстраверт?",
        options: &[
            ("Игровая комната с компом и техникой", "room"),
            ("Тусовка в ночном клубе", "club"),
        ],
    },
    Question {
        text: "Какой стиль отдыха Вам по душе?",
        options: &[
            ("Кровать", "bed"),
            ("Море", "sea"),
            ("Горы", "mount"),
            ("Пикник в лесу", "picnic"),
        ],
    },
    Question {
        text: "Какой лайфстайл Вы выберете?",
        options: &[
            ("Модная дорогая одежда", "fashion"),
            ("Спортивный стиль с худи", "sport"),
        ],
    },
    Question {
        text: "Кошки или собаки?",
        options: &[("Кошка", "cat"), ("Собака", "dog")],
    },
    Question {
        text: "Холод или тепло?",
        options: &[("Дождь", "rain"), ("Пляж", "beach")],
    },
];

/// Looks up the label for an option code of question `index`.
///
/// `None` when the index is out of range or the code does not belong to
/// that question.
pub fn option_label(index: usize, code: &str) -> Option<&'static str> {
    QUESTIONS
        .get(index)?
        .options
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(label, _)| *label)
}

/// Joins answer labels into the canonical catalog combination key.
pub fn combination_key(answers: &[&str]) -> String {
    answers.join(" + ")
}
