//! Minimal HTML pages. Every interpolated value goes through [`escape`].

use crate::models::{CustomerOption, CustomerRow, DashboardSummary, LoanWithCustomer, ReportBreakdown};
use crate::entities::LoanStatus;
use crate::utils::{Notice, NoticeLevel, format_currency};

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, notice: Option<&Notice>, signed_in: bool, body: &str) -> String {
    let nav = if signed_in {
        r#"<nav><a href="/dashboard">Dashboard</a> <a href="/customers">Customers</a> <a href="/loans">Loans</a> <a href="/reports">Reports</a> <a href="/logout">Logout</a></nav>"#
    } else {
        r#"<nav><a href="/">Home</a> <a href="/login">Login</a></nav>"#
    };
    let notice = notice.map(render_notice).unwrap_or_default();
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{title} | Microfinance</title></head>\n<body>\n{nav}\n{notice}<main>\n<h1>{title}</h1>\n{body}</main>\n</body>\n</html>\n",
        title = escape(title),
    )
}

fn render_notice(notice: &Notice) -> String {
    let class = match notice.level {
        NoticeLevel::Success => "success",
        NoticeLevel::Error => "error",
    };
    format!(
        "<div class=\"flash {class}\">{}</div>\n",
        escape(&notice.message)
    )
}

pub fn index_page(notice: Option<&Notice>) -> String {
    layout(
        "Welcome",
        notice,
        false,
        "<p>Customer and loan records for the office.</p>\n<p><a href=\"/login\">Employee login</a></p>\n",
    )
}

pub fn login_page(notice: Option<&Notice>) -> String {
    layout(
        "Login",
        notice,
        false,
        concat!(
            "<form method=\"post\" action=\"/login\">\n",
            "<label>Username <input name=\"username\" required></label>\n",
            "<label>Password <input name=\"password\" type=\"password\" required></label>\n",
            "<button type=\"submit\">Login</button>\n",
            "</form>\n",
        ),
    )
}

pub fn dashboard_page(notice: Option<&Notice>, summary: &DashboardSummary) -> String {
    let body = format!(
        "<dl>\n<dt>Total customers</dt><dd>{}</dd>\n<dt>Active loans</dt><dd>{}</dd>\n<dt>Total outstanding</dt><dd>{}</dd>\n</dl>\n",
        summary.customer_count,
        summary.active_loan_count,
        escape(&format_currency(summary.total_outstanding)),
    );
    layout("Dashboard", notice, true, &body)
}

pub fn customers_page(notice: Option<&Notice>, customers: &[CustomerRow]) -> String {
    let mut body = String::from(concat!(
        "<form method=\"post\" action=\"/customers\">\n",
        "<label>Name <input name=\"name\" required></label>\n",
        "<label>Phone <input name=\"phone\" required></label>\n",
        "<label>Collateral <input name=\"collateral\"></label>\n",
        "<button type=\"submit\">Add customer</button>\n",
        "</form>\n",
        "<table>\n<tr><th>ID</th><th>Name</th><th>Phone</th><th>Collateral</th></tr>\n",
    ));
    for c in customers {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            c.id,
            escape(&c.name),
            escape(&c.phone),
            escape(&c.collateral),
        ));
    }
    body.push_str("</table>\n");
    layout("Customers", notice, true, &body)
}

pub fn loans_page(
    notice: Option<&Notice>,
    loans: &[LoanWithCustomer],
    customers: &[CustomerOption],
) -> String {
    let mut body = String::from("<form method=\"post\" action=\"/loans\">\n<label>Customer <select name=\"customer_id\" required>\n");
    for c in customers {
        body.push_str(&format!(
            "<option value=\"{}\">{}</option>\n",
            c.id,
            escape(&c.name)
        ));
    }
    body.push_str(concat!(
        "</select></label>\n",
        "<label>Amount <input name=\"amount\" required></label>\n",
        "<label>Duration <input name=\"duration\" required></label>\n",
        "<label>Loan type <input name=\"loan_type\"></label>\n",
        "<label>Interest rate (%) <input name=\"interest_rate\" value=\"0\"></label>\n",
        "<button type=\"submit\">Issue loan</button>\n",
        "</form>\n",
    ));
    body.push_str(&loan_table(loans, true));
    layout("Loans", notice, true, &body)
}

pub fn reports_page(notice: Option<&Notice>, reports: &ReportBreakdown) -> String {
    let body = format!(
        "<h2>Paid loans</h2>\n{}<h2>Unpaid loans</h2>\n{}",
        loan_table(&reports.paid, false),
        loan_table(&reports.unpaid, false),
    );
    layout("Reports", notice, true, &body)
}

fn loan_table(loans: &[LoanWithCustomer], with_actions: bool) -> String {
    let mut table = String::from(concat!(
        "<table>\n<tr><th>ID</th><th>Customer</th><th>Amount</th><th>Date</th>",
        "<th>Duration</th><th>Status</th><th>Type</th><th>Rate</th><th>Collateral</th>",
        "<th>Outstanding</th>",
    ));
    if with_actions {
        table.push_str("<th></th>");
    }
    table.push_str("</tr>\n");

    for l in loans {
        table.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}%</td><td>{}</td><td>{}</td>",
            l.id,
            escape(&l.customer_name),
            escape(&format_currency(l.amount)),
            l.date.format("%Y-%m-%d"),
            l.duration,
            l.status,
            escape(&l.loan_type),
            l.interest_rate,
            escape(&l.collateral),
            escape(&format_currency(l.outstanding())),
        ));
        if with_actions {
            if l.status == LoanStatus::Unpaid {
                table.push_str(&format!("<td><a href=\"/loans/repay/{}\">Mark paid</a></td>", l.id));
            } else {
                table.push_str("<td></td>");
            }
        }
        table.push_str("</tr>\n");
    }
    table.push_str("</table>\n");
    table
}

pub fn error_page(status: u16, message: &str) -> String {
    layout(
        "Something went wrong",
        None,
        false,
        &format!("<p>{} {}</p>\n", status, escape(message)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Mama" & 'Baba'</b>"#),
            "&lt;b&gt;&quot;Mama&quot; &amp; &#39;Baba&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_dashboard_formats_currency() {
        let page = dashboard_page(
            None,
            &DashboardSummary {
                customer_count: 2,
                active_loan_count: 1,
                total_outstanding: 1100.0,
            },
        );
        assert!(page.contains("TZS 1,100.00"));
    }

    #[test]
    fn test_paid_loans_have_no_repay_link() {
        let loan = LoanWithCustomer {
            id: 9,
            customer_name: "<script>".to_string(),
            amount: 100.0,
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            duration: 3,
            status: LoanStatus::Paid,
            loan_type: "N/A".to_string(),
            interest_rate: 0.0,
            collateral: "N/A".to_string(),
        };
        let page = loans_page(None, &[loan], &[]);
        assert!(!page.contains("/loans/repay/9"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
    }

    #[test]
    fn test_notice_is_rendered() {
        let page = login_page(Some(&Notice::error("Invalid credentials")));
        assert!(page.contains("flash error"));
        assert!(page.contains("Invalid credentials"));
    }
}
