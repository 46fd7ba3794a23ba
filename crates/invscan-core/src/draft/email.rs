use urlencoding::encode;

use super::format::format_currency;
use crate::error::DraftError;
use crate::models::draft::InvoiceDraft;

/// Build a `mailto:` link that opens the user's mail client with the
/// invoice summary addressed to the recipient.
pub fn email_link(draft: &InvoiceDraft) -> Result<String, DraftError> {
    let totals = draft.totals()?;
    let sender = &draft.sender;

    let subject = format!("Invoice {} from {}", draft.invoice_number, sender.company_name);
    let body = format!(
        "Dear {recipient},\n\
         \n\
         Please find attached invoice {number}.\n\
         \n\
         Invoice Summary:\n\
         - Invoice Number: {number}\n\
         - Invoice Date: {date}\n\
         - Due Date: {due}\n\
         - Amount Due: {amount}\n\
         \n\
         Thank you for your business!\n\
         \n\
         Best regards,\n\
         {sender}\n\
         {email}",
        recipient = draft.recipient.company_name,
        number = draft.invoice_number,
        date = draft.invoice_date,
        due = draft.due_date,
        amount = format_currency(totals.total, &draft.currency),
        sender = sender.company_name,
        email = sender.email,
    );

    Ok(format!(
        "mailto:{}?subject={}&body={}",
        draft.recipient.email,
        encode(&subject),
        encode(&body)
    ))
}
