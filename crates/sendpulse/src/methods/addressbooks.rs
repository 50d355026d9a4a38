namespace! {
    /// Mailing list (address book) operations
    AddressBooks => "addressbooks" {
        create = Post "addressbooks" as "create";
        edit = Put "addressbooks/{{id}}" as "edit";
        remove = Delete "addressbooks/{{id}}" as "remove";
        get = Get "addressbooks" as "get";
        get_one = Get "addressbooks/{{id}}" as "getOne";
        /// Cost of a campaign sent to the whole book
        get_cost = Get "addressbooks/{{id}}/cost" as "getCost";
        get_variables = Get "addressbooks/{{id}}/variables" as "getVariables";
        get_emails = Get "addressbooks/{{id}}/emails" as "getEmails";
        get_emails_count = Get "addressbooks/{{id}}/emails/total" as "getEmailsCount";
        get_email = Get "addressbooks/{{id}}/emails/{{email}}" as "getEmail";
        get_emails_by_variable = Get "addressbooks/{{id}}/variables/{{name}}/{{value}}" as "getEmailsByVariable";
        create_email = Post "addressbooks/{{id}}/emails" as "createEmail", serialize ["emails"];
        remove_email = Delete "addressbooks/{{id}}/emails" as "removeEmail", serialize ["emails"];
        get_campaigns = Get "addressbooks/{{id}}/campaigns" as "getCampaigns";
    }
}
