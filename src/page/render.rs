use crate::config::site::SiteConfig;
use crate::core::catalog::CATALOG;
use crate::core::submission::{
    FAILURE_TITLE, MISSING_FIELDS, REJECTED_FALLBACK, SUCCESS_DESCRIPTION, SUCCESS_TITLE,
    TRANSPORT_FAILURE,
};
use crate::utils::format::escape_html;

/// Anchor targets, in page order, with their navigation labels.
pub const SECTIONS: [(&str, &str); 5] = [
    ("home", "Главная"),
    ("services", "Услуги"),
    ("calculator", "Калькулятор"),
    ("about", "О компании"),
    ("contacts", "Контакты"),
];

const SERVICE_CARDS: [(&str, &str); 6] = [
    (
        "Межевание земельных участков",
        "Установление и закрепление границ земельного участка на местности",
    ),
    (
        "Технические планы",
        "Подготовка технических планов зданий и сооружений для регистрации прав",
    ),
    (
        "Акты обследования",
        "Составление актов обследования объектов недвижимости",
    ),
    (
        "Вынос границ в натуру",
        "Определение и обозначение границ участка на местности",
    ),
    (
        "Топографическая съёмка",
        "Создание топографических планов местности для проектирования",
    ),
    (
        "Консультации",
        "Профессиональные консультации по кадастровым вопросам",
    ),
];

const FACTS: [(&str, &str); 3] = [
    ("10+", "лет опыта"),
    ("500+", "выполненных проектов"),
    ("100%", "довольных клиентов"),
];

const STYLE: &str = r#"html { scroll-behavior: smooth; }
body { margin: 0; font-family: system-ui, sans-serif; color: #1a202c; }
header { position: sticky; top: 0; z-index: 50; background: rgba(255,255,255,.95); border-bottom: 1px solid #e2e8f0; }
.container { max-width: 1100px; margin: 0 auto; padding: 0 16px; }
.bar { display: flex; height: 64px; align-items: center; justify-content: space-between; }
nav a { margin-left: 24px; color: inherit; text-decoration: none; font-size: 14px; }
section { padding: 80px 0; }
.cards { display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 24px; }
.card { border: 1px solid #e2e8f0; border-radius: 8px; padding: 24px; }
.facts { display: grid; grid-template-columns: repeat(3, 1fr); text-align: center; }
.fact-value { font-size: 36px; font-weight: 700; color: #2c5282; }
.quote { margin-top: 24px; padding: 24px; text-align: center; border: 2px solid #bee3f8; border-radius: 8px; }
.toast { position: fixed; right: 24px; bottom: 96px; padding: 16px; border-radius: 8px; background: #fff; box-shadow: 0 4px 12px rgba(0,0,0,.15); }
.toast[data-kind="failure"] { border-left: 4px solid #c53030; }
.toast[data-kind="success"] { border-left: 4px solid #2f855a; }
.messenger { position: fixed; right: 24px; bottom: 24px; width: 56px; height: 56px; border-radius: 50%; background: #25d366; color: #fff; display: flex; align-items: center; justify-content: center; text-decoration: none; }
"#;

/// Renders the whole landing page as one HTML document.
pub fn render_page(site: &SiteConfig) -> String {
    let mut html = String::with_capacity(16 * 1024);
    let name = escape_html(&site.site_name);

    html.push_str("<!DOCTYPE html>\n<html lang=\"ru\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", name));
    html.push_str(&format!("<style>\n{}</style>\n</head>\n<body>\n", STYLE));

    render_header(&mut html, &name);
    html.push_str("<main>\n");
    render_hero(&mut html, site);
    render_services(&mut html);
    render_calculator(&mut html);
    render_about(&mut html);
    render_contacts(&mut html, site);
    html.push_str("</main>\n");

    html.push_str(&format!(
        "<footer><div class=\"container\"><p>© {} {}. Все права защищены.</p></div></footer>\n",
        site.copyright_year, name
    ));
    html.push_str(&format!(
        "<a class=\"messenger\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" aria-label=\"Написать в мессенджер\">&#9993;</a>\n",
        escape_html(&site.messenger_url)
    ));
    html.push_str("<div id=\"toast\" class=\"toast\" role=\"status\" hidden></div>\n");
    render_script(&mut html, site);
    html.push_str("</body>\n</html>\n");
    html
}

fn render_header(html: &mut String, name: &str) {
    html.push_str(&format!(
        "<header><div class=\"container bar\"><strong>{}</strong><nav>\n",
        name
    ));
    for (id, label) in SECTIONS {
        html.push_str(&format!("<a href=\"#{}\" data-scroll=\"{}\">{}</a>", id, id, label));
    }
    html.push_str("</nav></div></header>\n");
}

fn render_hero(html: &mut String, site: &SiteConfig) {
    html.push_str(&format!(
        "<section id=\"home\"><div class=\"container\">\
         <h1>Профессиональные кадастровые услуги</h1><p>{}</p>\
         <p><a href=\"#calculator\" data-scroll=\"calculator\">Рассчитать стоимость</a> \
         <a href=\"#contacts\" data-scroll=\"contacts\">Связаться с нами</a></p>\
         </div></section>\n",
        escape_html(&site.tagline)
    ));
}

fn render_services(html: &mut String) {
    html.push_str(
        "<section id=\"services\"><div class=\"container\"><h2>Наши услуги</h2>\
         <p>Полный спектр кадастровых работ</p><div class=\"cards\">",
    );
    for (title, description) in SERVICE_CARDS {
        html.push_str(&format!(
            "<div class=\"card\"><h3>{}</h3><p>{}</p></div>",
            title, description
        ));
    }
    html.push_str("</div></div></section>\n");
}

fn render_calculator(html: &mut String) {
    html.push_str(
        "<section id=\"calculator\"><div class=\"container\"><div class=\"card\">\
         <h2>Калькулятор стоимости услуг</h2>\
         <p>Рассчитайте приблизительную стоимость кадастровых работ</p>\
         <label for=\"service\">Выберите тип услуги</label>\
         <select id=\"service\"><option value=\"\">Выберите услугу</option>",
    );
    for service in CATALOG.iter() {
        html.push_str(&format!(
            "<option value=\"{}\" data-base-price=\"{}\" data-price-per-unit=\"{}\">{}</option>",
            service.id,
            service.base_price,
            service.price_per_unit,
            escape_html(service.label)
        ));
    }
    html.push_str(
        "</select>\
         <label for=\"area\">Площадь объекта (м²)</label>\
         <input id=\"area\" type=\"number\" min=\"0\" step=\"any\" placeholder=\"Введите площадь\">\
         <button id=\"calculate\" type=\"button\">Рассчитать стоимость</button>\
         <div id=\"quote\" class=\"quote\" hidden><p>Приблизительная стоимость</p>\
         <p id=\"quote-amount\" class=\"fact-value\"></p>\
         <p>Окончательная стоимость определяется после осмотра объекта</p></div>\
         </div></div></section>\n",
    );
}

fn render_about(html: &mut String) {
    html.push_str(
        "<section id=\"about\"><div class=\"container\"><h2>О компании</h2>\
         <p>Мы являемся аккредитованными кадастровыми инженерами с многолетним опытом работы. \
         Наша команда специализируется на предоставлении полного спектра кадастровых услуг \
         для физических и юридических лиц.</p>\
         <p>Мы гарантируем высокое качество выполнения работ, соблюдение всех законодательных \
         требований и индивидуальный подход к каждому клиенту.</p><hr><div class=\"facts\">",
    );
    for (value, caption) in FACTS {
        html.push_str(&format!(
            "<div><div class=\"fact-value\">{}</div><div>{}</div></div>",
            value, caption
        ));
    }
    html.push_str("</div></div></section>\n");
}

fn render_contacts(html: &mut String, site: &SiteConfig) {
    let contacts = &site.contacts;
    let hours = contacts
        .hours
        .iter()
        .map(|line| escape_html(line))
        .collect::<Vec<_>>()
        .join("<br>");

    html.push_str(&format!(
        "<section id=\"contacts\"><div class=\"container\"><h2>Контакты</h2><div class=\"card\">\
         <p><strong>Телефон</strong><br><a href=\"tel:{dial}\">{phone}</a></p>\
         <p><strong>Email</strong><br><a href=\"mailto:{email}\">{email}</a></p>\
         <p><strong>Адрес</strong><br>{address}</p>\
         <p><strong>Режим работы</strong><br>{hours}</p></div>\n",
        dial = escape_html(&contacts.phone_dial),
        phone = escape_html(&contacts.phone_display),
        email = escape_html(&contacts.email),
        address = escape_html(&contacts.address),
        hours = hours,
    ));

    html.push_str(
        "<form id=\"lead-form\" class=\"card\">\
         <h3>Оставить заявку</h3>\
         <input name=\"name\" placeholder=\"Ваше имя\" required>\
         <input name=\"phone\" type=\"tel\" placeholder=\"Телефон\" required>\
         <input name=\"email\" type=\"email\" placeholder=\"Email\">\
         <textarea name=\"message\" placeholder=\"Сообщение\" required></textarea>\
         <button type=\"submit\">Отправить заявку</button>\
         </form></div></section>\n",
    );
}

fn render_script(html: &mut String, site: &SiteConfig) {
    let messages = serde_json::json!({
        "endpoint": site.lead_endpoint,
        "successTitle": SUCCESS_TITLE,
        "successDescription": SUCCESS_DESCRIPTION,
        "failureTitle": FAILURE_TITLE,
        "rejectedFallback": REJECTED_FALLBACK,
        "transportFailure": TRANSPORT_FAILURE,
        "missingFields": MISSING_FIELDS,
    });
    // `</` cannot appear inside an inline script
    let messages = messages.to_string().replace("</", "<\\/");

    html.push_str(&format!("<script>\nconst SITE = {};\n", messages));
    html.push_str(
        r#"document.querySelectorAll('[data-scroll]').forEach((link) => link.addEventListener('click', (e) => {
  e.preventDefault();
  document.getElementById(link.dataset.scroll)?.scrollIntoView({ behavior: 'smooth' });
}));
document.getElementById('calculate').addEventListener('click', () => {
  const option = document.getElementById('service').selectedOptions[0];
  const raw = document.getElementById('area').value.trim();
  const area = Number(raw);
  if (!option || !option.value || raw === '' || !Number.isFinite(area) || area < 0) return;
  const amount = Number(option.dataset.basePrice) + Number(option.dataset.pricePerUnit) * area;
  if (!Number.isFinite(amount)) return;
  document.getElementById('quote-amount').textContent = amount.toLocaleString('ru-RU') + ' ₽';
  document.getElementById('quote').hidden = false;
});
function toast(kind, title, description) {
  const el = document.getElementById('toast');
  el.dataset.kind = kind;
  el.textContent = title + ': ' + description;
  el.hidden = false;
  setTimeout(() => { el.hidden = true; }, 5000);
}
const form = document.getElementById('lead-form');
form.addEventListener('submit', async (e) => {
  e.preventDefault();
  const button = form.querySelector('button');
  if (button.disabled) return;
  const lead = Object.fromEntries(['name', 'phone', 'email', 'message'].map((k) => [k, form.elements[k].value]));
  if (!lead.name.trim() || !lead.phone.trim() || !lead.message.trim()) {
    toast('failure', SITE.failureTitle, SITE.missingFields);
    return;
  }
  button.disabled = true;
  try {
    const response = await fetch(SITE.endpoint, {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify(lead),
    });
    if (response.ok) {
      form.reset();
      toast('success', SITE.successTitle, SITE.successDescription);
    } else {
      const body = await response.json().catch(() => ({}));
      toast('failure', SITE.failureTitle, body.error || SITE.rejectedFallback);
    }
  } catch (_) {
    toast('failure', SITE.failureTitle, SITE.transportFailure);
  } finally {
    button.disabled = false;
  }
});
</script>
"#,
    );
}
