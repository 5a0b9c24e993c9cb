//! NuGet package descriptor template.
//!
//! Rendered with the camelCase Options data model. Values are XML-escaped.

/// `.nuspec` template.
///
/// See: https://learn.microsoft.com/nuget/reference/nuspec
pub const NUSPEC_TEMPLATE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<package xmlns="http://schemas.microsoft.com/packaging/2010/07/nuspec.xsd">
  <metadata>
    <id>{{name}}</id>
    <title>{{#if productName}}{{productName}}{{else}}{{name}}{{/if}}</title>
    <version>{{nugetVersion}}</version>
    <authors>{{#each authors}}{{#unless @first}}, {{/unless}}{{this}}{{/each}}</authors>
    <owners>{{#each owners}}{{#unless @first}}, {{/unless}}{{this}}{{/each}}</owners>
{{#if iconUrl}}
    <iconUrl>{{iconUrl}}</iconUrl>
{{/if}}
{{#if licenseUrl}}
    <licenseUrl>{{licenseUrl}}</licenseUrl>
{{/if}}
{{#if homepage}}
    <projectUrl>{{homepage}}</projectUrl>
{{/if}}
    <requireLicenseAcceptance>{{requireLicenseAcceptance}}</requireLicenseAcceptance>
    <description>{{productDescription}}</description>
    <summary>{{description}}</summary>
{{#if copyright}}
    <copyright>{{copyright}}</copyright>
{{/if}}
    <tags>{{#each tags}}{{#unless @first}} {{/unless}}{{this}}{{/each}}</tags>
  </metadata>
  <files>
    <file src="locales\**" target="lib\net45\locales" />
    <file src="resources\**" target="lib\net45\resources" />
    <file src="*.bin" target="lib\net45" />
    <file src="*.dll" target="lib\net45" />
    <file src="*.pak" target="lib\net45" />
    <file src="*.dat" target="lib\net45" />
    <file src="Update.exe" target="lib\net45\squirrel.exe" />
    <file src="LICENSE*" target="lib\net45" />
    <file src="{{exe}}" target="lib\net45" />
  </files>
</package>
"#;
