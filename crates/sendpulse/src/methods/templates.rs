namespace! {
    /// Email template operations
    Templates => "templates" {
        create = Post "template" as "create";
        edit = Post "template/edit/{{id}}" as "edit";
        /// Pass `owner: "sendpulse"` for the built-in templates
        get = Get "templates" as "get";
        get_one = Get "template/{{id}}" as "getOne";
        get_by_lang = Get "templates/{{lang}}" as "getByLang";
    }
}
