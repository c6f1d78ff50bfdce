use crate::dates::{format_br, parse_workout_date, weekday_label};
use crate::models::{ClassSession, DayGroup, GroupBucket, MonthlySummary, Student, ViewState};
use crate::schedule::class_color;
use crate::stats::training_days_label;

const GENERIC_AVATAR: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' width='128' height='128'><rect width='100%25' height='100%25' fill='%23e5e7eb'/><circle cx='64' cy='50' r='24' fill='%239ca3af'/><rect x='32' y='78' width='64' height='32' rx='16' fill='%239ca3af'/></svg>";

/// Session-dependent bits of the navigation bar.
pub struct Nav<'a> {
    pub registration: Option<&'a str>,
    pub menu_open: bool,
    pub path: &'a str,
}

pub fn render_home(
    nav: &Nav<'_>,
    view: &ViewState,
    upcoming: &[(String, Vec<ClassSession>)],
    today: &[(String, Vec<ClassSession>)],
    class_names: &[String],
) -> String {
    let selected = view.class_filter();

    let mut body = String::from(
        r#"<section class="card hero">
  <h1>Quattor Academia</h1>
  <p class="subtitle">RUA 5 SUL - ÁGUAS CLARAS</p>
  <p class="contacts">
    <a href="https://wa.me/5561993190568" target="_blank" rel="noreferrer">WhatsApp (61) 99319-0568</a>
    <a href="https://www.instagram.com/quattor_academia/" target="_blank" rel="noreferrer">Instagram</a>
    <a href="mailto:recepcao@quattoracademia.com">E-mail</a>
  </p>
</section>
<section class="card">
  <h2>Horário de Funcionamento</h2>
  <p>Segunda a Sexta: 5h às 23h</p>
  <p>Sáb | Dom | Feriados: 8h às 12h</p>
</section>
"#,
    );

    body.push_str("<section class=\"card\">\n  <h2>Próximas aulas</h2>\n");
    if upcoming.is_empty() {
        body.push_str("  <p class=\"muted\">Nenhuma aula programada.</p>\n");
    } else {
        for (date, classes) in upcoming {
            push_class_day(&mut body, date, classes.iter());
        }
    }
    body.push_str("</section>\n");

    body.push_str("<section class=\"card\">\n  <h2>Aulas de hoje</h2>\n");
    if today.is_empty() {
        body.push_str("  <p class=\"muted\">Nenhuma aula agendada.</p>\n");
    } else {
        body.push_str("  <form method=\"get\" action=\"/\" class=\"filter\">\n");
        if nav.menu_open {
            body.push_str("    <input type=\"hidden\" name=\"menu\" value=\"open\" />\n");
        }
        body.push_str("    <select name=\"aula\">\n");
        body.push_str(&format!(
            "      <option value=\"todas\"{}>Todas</option>\n",
            if selected.is_none() { " selected" } else { "" }
        ));
        for name in class_names {
            let is_selected = selected == Some(name.as_str());
            body.push_str(&format!(
                "      <option value=\"{0}\"{1}>{0}</option>\n",
                escape_html(name),
                if is_selected { " selected" } else { "" }
            ));
        }
        body.push_str("    </select>\n    <button type=\"submit\">Filtrar</button>\n  </form>\n");

        for (date, classes) in today {
            let shown: Vec<&ClassSession> = classes
                .iter()
                .filter(|class| selected.is_none_or(|name| class.name == name))
                .collect();
            if !shown.is_empty() {
                push_class_day(&mut body, date, shown.into_iter());
            }
        }
    }
    body.push_str("</section>\n");

    layout("Quattor Academia", nav, &body)
}

fn push_class_day<'a>(
    body: &mut String,
    date: &str,
    classes: impl Iterator<Item = &'a ClassSession>,
) {
    body.push_str(&format!(
        "  <div class=\"day\">\n    <span class=\"day-label\">{}</span>\n",
        escape_html(&weekday_label(date))
    ));
    for class in classes {
        body.push_str(&format!(
            "    <div class=\"class\"><span class=\"time\">{}</span><span class=\"dot\" style=\"background:{}\" aria-hidden=\"true\"></span><span>{}</span><span class=\"muted\">{}</span><span class=\"muted\">{}/{}</span></div>\n",
            escape_html(&class.start_time),
            class_color(class.activity_id),
            escape_html(&class.name),
            escape_html(&class.instructor),
            class.occupation,
            class.capacity,
        ));
    }
    body.push_str("  </div>\n");
}

pub fn render_login(
    nav: &Nav<'_>,
    error: Option<&str>,
    redirect: Option<&str>,
    password_reset_url: &str,
) -> String {
    let alert = error
        .map(|message| format!("<div class=\"alert\" role=\"alert\">{}</div>\n", escape_html(message)))
        .unwrap_or_default();
    let redirect_input = redirect
        .map(|path| {
            format!(
                "<input type=\"hidden\" name=\"redirect\" value=\"{}\" />\n",
                escape_html(path)
            )
        })
        .unwrap_or_default();

    let body = fill(
        LOGIN_HTML,
        &[
            ("ALERT", alert.as_str()),
            ("REDIRECT", redirect_input.as_str()),
            ("RESET_URL", escape_html(password_reset_url).as_str()),
        ],
    );
    layout("Entrar | Quattor Academia", nav, &body)
}

const LOGIN_HTML: &str = r#"<section class="card narrow">
  <h1>Entrar</h1>
  {{ALERT}}<form method="post" action="/login" class="stack">
    {{REDIRECT}}<label for="email">E-mail</label>
    <input id="email" type="email" name="email" autocomplete="email" placeholder="seu@email.com" required />
    <label for="senha">Senha</label>
    <input id="senha" type="password" name="senha" autocomplete="current-password" required />
    <button type="submit">Entrar</button>
  </form>
  <form method="get" action="{{RESET_URL}}" target="_blank" class="stack reset">
    <p class="muted">Mudar a senha? Digite seu e-mail:</p>
    <input type="email" name="email" placeholder="seu@email.com" />
    <input type="hidden" name="login" value="False" />
    <button type="submit" class="secondary">Continuar</button>
  </form>
</section>
"#;

pub fn render_profile(
    nav: &Nav<'_>,
    student: &Student,
    summary: &MonthlySummary,
    days: &[DayGroup],
) -> String {
    let photo = if student.photo.is_empty() {
        GENERIC_AVATAR
    } else {
        student.photo.as_str()
    };

    let mut body = format!(
        r#"<section class="card profile">
  <img src="{photo}" alt="aluno" class="avatar" />
  <div>
    <div class="name">{name}</div>
    <div class="muted">{plan} | {end_date}</div>
    <div class="facts"><span>Matrícula {registration}</span><span>{days} {days_label}</span></div>
  </div>
</section>
<section class="stats">
  <div class="card stat"><span class="value">{groups}</span><span class="label">Grupos Musculares</span></div>
  <div class="card stat"><span class="value">{exercises}</span><span class="label">Exercícios no mês</span></div>
</section>
<section class="card">
  <h2>Histórico de treinos</h2>
"#,
        photo = escape_html(photo),
        name = escape_html(&student.name),
        plan = escape_html(&student.plan),
        end_date = escape_html(&student.end_date),
        registration = escape_html(&student.registration),
        days = summary.training_days,
        days_label = training_days_label(summary.training_days),
        groups = summary.muscle_groups,
        exercises = summary.exercises,
    );

    if days.is_empty() {
        body.push_str("  <p class=\"muted\">Nenhum treino encontrado no histórico.</p>\n");
    } else {
        for day in days {
            body.push_str(&format!(
                "  <div class=\"day\">\n    <div class=\"day-label\">{} ({})</div>\n",
                escape_html(&day.display_date),
                day.total_count
            ));
            for group in &day.groups {
                body.push_str(&format!(
                    "    <div class=\"group\">{} ({})</div>\n    <ul>\n",
                    escape_html(&group.name),
                    group.records.len()
                ));
                for record in &group.records {
                    body.push_str(&format!(
                        "      <li><span>{}</span><span class=\"muted\">{}</span></li>\n",
                        escape_html(&record.name),
                        escape_html(&day.display_date)
                    ));
                }
                body.push_str("    </ul>\n");
            }
            body.push_str("  </div>\n");
        }
    }
    body.push_str("</section>\n");

    layout(&format!("{} | Quattor Academia", student.name), nav, &body)
}

pub fn render_student_missing(nav: &Nav<'_>) -> String {
    layout(
        "Quattor Academia",
        nav,
        "<section class=\"card narrow\"><p class=\"muted\">Aluno não encontrado.</p></section>\n",
    )
}

pub fn render_history(nav: &Nav<'_>, registration: u64, groups: &[GroupBucket]) -> String {
    let mut body = format!(
        "<section class=\"card\">\n  <h1>Histórico de treinos</h1>\n  <p class=\"muted\">Matrícula: {registration}</p>\n"
    );
    if groups.is_empty() {
        body.push_str("  <p class=\"muted\">Nenhum treino encontrado no histórico.</p>\n");
    }
    for group in groups {
        let anchor = format!(
            "grupo-{}",
            group.name.split_whitespace().collect::<Vec<_>>().join("-").to_lowercase()
        );
        body.push_str(&format!(
            "  <section aria-labelledby=\"{0}\">\n    <h2 id=\"{0}\">{1}</h2>\n    <ul>\n",
            escape_html(&anchor),
            escape_html(&group.name)
        ));
        for record in &group.records {
            let shown_date = if record.date.is_empty() {
                "—".to_string()
            } else {
                parse_workout_date(&record.date)
                    .map(format_br)
                    .unwrap_or_else(|| record.date.clone())
            };
            body.push_str(&format!(
                "      <li><span>{}</span><time datetime=\"{}\">{}</time>",
                escape_html(&record.name),
                escape_html(&record.date),
                escape_html(&shown_date)
            ));
            if !record.load.is_empty() {
                body.push_str(&format!("<p class=\"muted\">Carga: {}</p>", escape_html(&record.load)));
            }
            body.push_str("</li>\n");
        }
        body.push_str("    </ul>\n  </section>\n");
    }
    body.push_str("</section>\n");

    layout("Histórico | Quattor Academia", nav, &body)
}

fn render_nav(nav: &Nav<'_>) -> String {
    let toggle = if nav.menu_open {
        format!("<a class=\"toggle\" href=\"{}\" aria-expanded=\"true\">✕</a>", escape_html(nav.path))
    } else {
        format!(
            "<a class=\"toggle\" href=\"{}?menu=open\" aria-expanded=\"false\">☰</a>",
            escape_html(nav.path)
        )
    };
    let links = match nav.registration {
        Some(registration) => format!(
            "<a href=\"/\">Início</a><a href=\"/aluno/{0}\">Meu perfil</a><a href=\"/aluno/{0}/historico\">Histórico</a><a href=\"/logout\">Sair</a>",
            escape_html(registration)
        ),
        None => "<a href=\"/\">Início</a><a href=\"/login\">Entrar</a>".to_string(),
    };
    format!(
        "<nav><a class=\"brand\" href=\"/\">Quattor</a>{toggle}<div class=\"menu{}\">{links}</div></nav>",
        if nav.menu_open { " open" } else { "" }
    )
}

fn layout(title: &str, nav: &Nav<'_>, body: &str) -> String {
    fill(
        LAYOUT_HTML,
        &[
            ("TITLE", escape_html(title).as_str()),
            ("NAV", render_nav(nav).as_str()),
            ("BODY", body),
        ],
    )
}

/// Substitutes `{{KEY}}` placeholders in one pass over `template`; inserted
/// values are never scanned again.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let found = after.find("}}").and_then(|end| {
            values
                .iter()
                .find(|(key, _)| *key == &after[..end])
                .map(|(_, value)| (*value, end))
        });
        match found {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --bg: #f3f4f6;
      --card: #ffffff;
      --ink: #1e2a44;
      --muted: #6b7280;
      --accent: #f97316;
      --green: #2e7d32;
      --shadow: 0 8px 24px rgba(30, 42, 68, 0.08);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
    }

    nav {
      position: sticky;
      top: 0;
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
      padding: 10px 20px;
      background: white;
      box-shadow: var(--shadow);
    }

    nav a {
      color: var(--ink);
      text-decoration: none;
      margin-right: 16px;
    }

    .brand {
      font-weight: 700;
      color: var(--accent);
    }

    .toggle {
      display: none;
    }

    @media (max-width: 640px) {
      .toggle {
        display: inline;
      }

      .menu {
        display: none;
        width: 100%;
      }

      .menu.open {
        display: flex;
        flex-direction: column;
        gap: 8px;
      }
    }

    main {
      width: min(860px, 100%);
      margin: 0 auto;
      padding: 24px 16px 48px;
      display: grid;
      gap: 16px;
    }

    .card {
      background: var(--card);
      border-radius: 16px;
      box-shadow: var(--shadow);
      padding: 20px;
    }

    .narrow {
      max-width: 420px;
      margin: 0 auto;
      width: 100%;
    }

    .muted {
      color: var(--muted);
      font-size: 0.9rem;
    }

    .alert {
      padding: 12px;
      border-radius: 8px;
      background: #fef2f2;
      border: 1px solid #fecaca;
      color: #b91c1c;
      margin-bottom: 12px;
    }

    .stack {
      display: grid;
      gap: 10px;
    }

    .reset {
      margin-top: 24px;
    }

    input, select {
      padding: 10px 12px;
      border-radius: 8px;
      border: 1px solid #d1d5db;
    }

    button {
      border: none;
      border-radius: 8px;
      padding: 12px 16px;
      background: var(--accent);
      color: white;
      font-weight: 600;
      cursor: pointer;
    }

    button.secondary {
      background: var(--ink);
    }

    .day {
      padding-top: 12px;
    }

    .day-label {
      font-weight: 600;
      color: var(--accent);
    }

    .class {
      display: flex;
      gap: 10px;
      align-items: center;
      padding: 6px 0;
    }

    .dot {
      width: 10px;
      height: 10px;
      border-radius: 50%;
    }

    .group {
      color: var(--green);
      margin-top: 8px;
    }

    .profile {
      display: flex;
      gap: 20px;
      align-items: center;
    }

    .avatar {
      width: 128px;
      height: 128px;
      object-fit: cover;
      border-radius: 16px;
    }

    .name {
      font-size: 1.2rem;
      font-weight: 700;
    }

    .facts {
      display: flex;
      gap: 16px;
      margin-top: 8px;
      color: var(--muted);
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    .stat .value {
      display: block;
      font-size: 1.6rem;
      font-weight: 600;
    }

    .stat .label {
      color: var(--muted);
    }

    ul {
      list-style: none;
      padding: 0;
    }

    li {
      display: flex;
      flex-wrap: wrap;
      justify-content: space-between;
      padding: 6px 0;
    }
  </style>
</head>
<body>
  {{NAV}}
  <main>
{{BODY}}  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkoutRecord;

    fn nav() -> Nav<'static> {
        Nav {
            registration: None,
            menu_open: false,
            path: "/",
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("<b>\"A&B\"</b>"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
    }

    #[test]
    fn login_shows_alert_only_when_given() {
        let page = render_login(&nav(), None, None, "https://reset.example");
        assert!(!page.contains("role=\"alert\""));

        let page = render_login(&nav(), Some("E-mail ou senha incorretos."), Some("/aluno/1"), "https://reset.example");
        assert!(page.contains("E-mail ou senha incorretos."));
        assert!(page.contains("name=\"redirect\" value=\"/aluno/1\""));
    }

    #[test]
    fn profile_lists_grouped_history() {
        let student = Student {
            name: "Ana".into(),
            registration: "17841".into(),
            ..Default::default()
        };
        let summary = MonthlySummary {
            training_days: 1,
            muscle_groups: 1,
            exercises: 2,
        };
        let days = vec![DayGroup {
            display_date: "02/03/2026".into(),
            groups: vec![GroupBucket {
                name: "Peito".into(),
                records: vec![WorkoutRecord {
                    name: "Supino + Crucifixo".into(),
                    date: "2026-03-02".into(),
                    ..Default::default()
                }],
            }],
            total_count: 1,
        }];
        let page = render_profile(&nav(), &student, &summary, &days);
        assert!(page.contains("1 dia de treino no mês"));
        assert!(page.contains("02/03/2026 (1)"));
        assert!(page.contains("Peito (1)"));
        assert!(page.contains("src=\"data:image/svg+xml;utf8,"));
    }

    #[test]
    fn placeholders_in_member_data_stay_literal() {
        let student = Student {
            name: "{{BODY}}".into(),
            registration: "1".into(),
            ..Default::default()
        };
        let page = render_profile(&nav(), &student, &MonthlySummary::default(), &[]);
        assert!(page.contains("<title>{{BODY}} | Quattor Academia</title>"));
        assert!(page.contains("<div class=\"name\">{{BODY}}</div>"));
        assert_eq!(page.matches("Grupos Musculares").count(), 1);
        assert!(page.contains("Nenhum treino encontrado no histórico."));

        let page = render_login(&nav(), None, Some("{{RESET_URL}}"), "https://reset.example");
        assert!(page.contains("name=\"redirect\" value=\"{{RESET_URL}}\""));
    }

    #[test]
    fn fill_leaves_unknown_placeholders() {
        assert_eq!(fill("a {{X}} b {{Y}} {{", &[("X", "1")]), "a 1 b {{Y}} {{");
    }

    #[test]
    fn menu_state_toggles_nav_links() {
        let open = Nav {
            registration: Some("5"),
            menu_open: true,
            path: "/aluno/5",
        };
        let page = render_student_missing(&open);
        assert!(page.contains("class=\"menu open\""));
        assert!(page.contains("href=\"/logout\""));
        assert!(page.contains("Aluno não encontrado."));
    }
}
