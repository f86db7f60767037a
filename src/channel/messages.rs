//! User-facing message texts and button labels.

pub const GREETING: &str = "Привет! Я — бот Shermadini House.\n\n\
    Сейчас помогу тебе выбрать идеальный аромат, исходя из твоих предпочтений.";

pub const PURCHASE_CAPTION: &str =
    "Отличный выбор! Нажмите кнопку ниже, чтобы перейти к покупке.";

pub const PURCHASE_BUTTON: &str = "Перейти к покупке";

pub const NO_MATCH: &str = "К сожалению, по заданной комбинации нет артикула.\n\
    Мы работаем над расширением ассортимента!";

pub const SERVICE_UNAVAILABLE: &str = "Сервис временно недоступен. Попробуйте позже.";

pub const RESTART_PROMPT: &str = "Хотите пройти опрос ещё раз?";

pub const RESTART_RETRY_LABEL: &str = "Пройти ещё раз";
pub const RESTART_RETRY_CODE: &str = "retry";

pub const RESTART_END_LABEL: &str = "Завершить";
pub const RESTART_END_CODE: &str = "end";

pub const RESTARTING: &str = "Начинаем заново!";

pub const GOODBYE: &str = "Спасибо за участие! ✨";

pub const LINK_NOT_FOUND: &str = "Ссылка не найдена";

pub const REPORT_FAILURE: &str = "Не удалось сформировать отчёт.";
